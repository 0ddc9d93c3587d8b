//! Outgoing request and response types

use std::collections::HashMap;

/// HTTP request to be made against an upstream API
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    /// URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: Vec<(String, String)>,
    /// POST body data
    pub data: Option<RequestBody>,
}

impl OutgoingRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Get)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Post)
    }

    fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HashMap::new(),
            params: Vec::new(),
            data: None,
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add form data (sets content-type to form-urlencoded)
    pub fn form(mut self, data: HashMap<String, String>) -> Self {
        self.data = Some(RequestBody::Form(data));
        self
    }

    /// Add JSON body
    pub fn json(mut self, data: serde_json::Value) -> Self {
        self.data = Some(RequestBody::Json(data));
        self
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Request body types
#[derive(Debug, Clone)]
pub enum RequestBody {
    Form(HashMap<String, String>),
    Json(serde_json::Value),
}

/// HTTP response from an upstream API
#[derive(Debug)]
pub struct UpstreamResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Cookies set by this response
    pub cookies: HashMap<String, String>,
    /// Response body as text
    pub text: String,
}

impl UpstreamResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.text)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if response indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Body truncated for log and error messages
    pub fn snippet(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(200)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = OutgoingRequest::get("https://example.com/api")
            .param("q", "rust")
            .param("page", "2")
            .header("Accept", "application/json");

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.params.len(), 2);
        assert_eq!(request.params[0], ("q".to_string(), "rust".to_string()));
        assert_eq!(request.headers.get("Accept").unwrap(), "application/json");
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let response = UpstreamResponse {
            status: 500,
            headers: HashMap::new(),
            cookies: HashMap::new(),
            text: "é".repeat(300),
        };
        assert_eq!(response.snippet().chars().count(), 200);
        assert!(!response.is_success());
    }
}
