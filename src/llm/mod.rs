//! Language model access
//!
//! The pipelines only need "prompt in, text out"; everything provider
//! specific lives behind the [`LanguageModel`] trait.

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;

/// Errors from a language model call
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The request never produced a response
    #[error("Gemini request failed: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout
    #[error("Gemini request timed out")]
    Timeout,

    /// The API answered with a non-success status
    #[error("Gemini API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The API answered with a body we could not decode
    #[error("failed to decode Gemini response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Transport(e.without_url().to_string())
        }
    }
}

/// A text-generation model
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model identifier, used in logs
    fn name(&self) -> &str;

    /// Generate a completion for a single-turn prompt
    ///
    /// An empty string means the model answered without any text
    /// (for example a blocked prompt); callers decide whether that is an error.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
