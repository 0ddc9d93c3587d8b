//! Gemini `generateContent` client

use super::{LanguageModel, LlmError};
use crate::config::LlmSettings;
use crate::network::{HttpClient, OutgoingRequest};
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Google Gemini text-generation client
pub struct GeminiClient {
    client: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client from settings; fails when no API key is configured
    pub fn new(client: HttpClient, settings: &LlmSettings) -> anyhow::Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .context("Missing GEMINI_API_KEY; set it in the environment, .env or settings.yml")?;

        Ok(Self {
            client,
            api_key,
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = OutgoingRequest::post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }));

        let response = self.client.execute(request).await?;

        if !response.is_success() {
            return Err(LlmError::Status {
                status: response.status,
                body: response.snippet().to_string(),
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        let text = body.text();
        debug!("Gemini {} returned {} chars", self.model, text.len());
        Ok(text)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
