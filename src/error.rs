//! Error types for Scout-RS
//!
//! `ScoutError` is what the pipelines return; its `IntoResponse` impl decides
//! which HTTP status each failure maps to. Ranking failures never show up here,
//! they degrade to the unranked list inside the ranker.

use crate::linkedin::SearchError;
use crate::llm::LlmError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Fixed message returned when no network search client is available
pub const NETWORK_UNAVAILABLE_MESSAGE: &str =
    "LinkedIn client not initialized. Check LINKEDIN_USERNAME and LINKEDIN_PASSWORD, or enable MOCK_MODE.";

/// Errors surfaced to API callers
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// The network search client could not be initialized at startup
    #[error("{}", NETWORK_UNAVAILABLE_MESSAGE)]
    NetworkUnavailable,

    /// A downstream people/company search failed
    #[error("LinkedIn search failed: {0}")]
    Search(#[from] SearchError),

    /// The language model produced no usable search keywords
    #[error("No response from Gemini API")]
    EmptyKeywords,

    /// The request body is well-formed JSON but semantically invalid
    #[error("{0}")]
    Validation(String),

    /// The language model call itself failed
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ScoutError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ScoutError::NetworkUnavailable | ScoutError::Search(_) | ScoutError::EmptyKeywords => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ScoutError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ScoutError::Llm(_) | ScoutError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ScoutError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status.as_u16(), self);
        }
        (
            status,
            Json(serde_json::json!({ "detail": self.to_string() })),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
