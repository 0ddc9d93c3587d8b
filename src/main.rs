//! Scout-RS: investor and competitor discovery service
//!
//! This is the main entry point for the application.

use anyhow::{Context, Result};
use scout_rs::{
    config, linkedin,
    llm::GeminiClient,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    let dotenv = dotenvy::dotenv().ok();

    // Load configuration
    let settings_path = config::find_settings_file();
    let settings = config::load(settings_path.as_deref())?;

    // Initialize logging; RUST_LOG wins over the debug flag
    let default_level = if settings.general.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    info!("Starting {} v{}", settings.general.service_name, scout_rs::VERSION);
    if let Some(path) = dotenv {
        info!("Loaded environment from: {}", path.display());
    }
    match &settings_path {
        Some(path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    // Language model; nothing works without it
    let gemini = GeminiClient::new(client.clone(), &settings.llm)
        .context("language model is not configured")?;
    info!("Using Gemini model {}", settings.llm.model);

    // Network search; the service still starts without it
    let network = linkedin::connect(&settings.linkedin, client).await;

    // Create application state
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);
    let state = AppState::new(settings, Arc::new(gemini), network);

    // Create router
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
