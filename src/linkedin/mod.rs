//! Professional-network search
//!
//! Defines the [`NetworkSearch`] trait used by the pipelines, the live
//! LinkedIn Voyager client, and the fixed-record client used in mock mode.

mod client;
mod mock;

pub use client::LinkedinClient;
pub use mock::MockNetworkSearch;

use crate::config::LinkedinSettings;
use crate::network::HttpClient;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// A loosely-typed search result record
///
/// People records carry `name`, `jobtitle`, `location` and `urn_id`;
/// company records carry `name`, `headline`, `subline` and `urn_id`.
/// Any of them may be missing.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Errors from the network search API
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Login was refused or the session is no longer valid
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The request never produced a response
    #[error("HTTP error: {0}")]
    Http(String),

    /// The request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Too many requests
    #[error("rate limited by LinkedIn")]
    RateLimited,

    /// The API answered with a non-success status
    #[error("LinkedIn returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The API answered with a body we could not decode
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SearchError::Timeout
        } else {
            SearchError::Http(e.without_url().to_string())
        }
    }
}

/// People and company search against a professional network
#[async_trait]
pub trait NetworkSearch: Send + Sync {
    /// Client name, used in logs
    fn name(&self) -> &str;

    /// Search people by keywords, returning at most `limit` records
    async fn search_people(
        &self,
        keywords: &str,
        limit: usize,
    ) -> Result<Vec<RawRecord>, SearchError>;

    /// Search companies by keywords, returning at most `limit` records
    async fn search_companies(
        &self,
        keywords: &str,
        limit: usize,
    ) -> Result<Vec<RawRecord>, SearchError>;
}

/// Establish the process-wide search client
///
/// Returns `None` when no client could be set up; the search endpoints then
/// answer 503 while the rest of the service keeps running.
pub async fn connect(
    settings: &LinkedinSettings,
    client: HttpClient,
) -> Option<Arc<dyn NetworkSearch>> {
    if settings.mock_mode {
        info!("Mock mode enabled, serving fixed sample records");
        return Some(Arc::new(MockNetworkSearch::new()));
    }

    let Some((username, password)) = settings.credentials() else {
        warn!("LinkedIn credentials not configured; search endpoints will return 503");
        return None;
    };

    match LinkedinClient::authenticate(client, &settings.base_url, username, password).await {
        Ok(linkedin) => {
            info!("Authenticated with LinkedIn");
            Some(Arc::new(linkedin))
        }
        Err(e) => {
            warn!("LinkedIn authentication failed: {}", e);
            None
        }
    }
}
