//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;
use url::Url;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.server.allowed_origins);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/find-investors", post(handlers::find_investors))
        .route("/find-competitors", post(handlers::find_competitors))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .map(String::as_str)
        .filter_map(origin_header)
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// `scheme://host[:port]` for a configured origin, which may carry a path
fn origin_header(origin: &str) -> Option<HeaderValue> {
    let url = match Url::parse(origin.trim()) {
        Ok(url) => url,
        Err(e) => {
            warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
            return None;
        }
    };
    HeaderValue::from_str(&url.origin().ascii_serialization()).ok()
}
