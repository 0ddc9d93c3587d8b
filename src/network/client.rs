//! HTTP client shared by the Gemini and LinkedIn clients

use super::request::{HttpMethod, OutgoingRequest, RequestBody, UpstreamResponse};
use super::user_agent::generate_user_agent;
use crate::config::OutgoingSettings;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP client wrapper configured from the outgoing settings
///
/// Cloning is cheap; all clones share one connection pool and cookie jar.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> reqwest::Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .build()?;

        let user_agent = match settings.useragent_suffix {
            Some(ref suffix) => format!("{} {}", generate_user_agent(), suffix),
            None => generate_user_agent(),
        };

        Ok(Self { client, user_agent })
    }

    /// Execute an outgoing request
    pub async fn execute(&self, request: OutgoingRequest) -> reqwest::Result<UpstreamResponse> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        req_builder = req_builder.header("User-Agent", &self.user_agent);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        if let Some(body) = request.data {
            req_builder = match body {
                RequestBody::Form(data) => req_builder.form(&data),
                RequestBody::Json(json) => req_builder.json(&json),
            };
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: Response) -> reqwest::Result<UpstreamResponse> {
        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let cookies = response
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();

        let text = response.text().await?;

        Ok(UpstreamResponse {
            status,
            headers,
            cookies,
            text,
        })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_useragent_suffix() {
        let settings = OutgoingSettings {
            useragent_suffix: Some("scout/1.0".to_string()),
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        assert!(client.user_agent().ends_with(" scout/1.0"));
    }

    #[tokio::test]
    async fn test_execute_sends_params_and_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(query_param("key", "abc"))
            .and(header_exists("user-agent"))
            .and(body_json(serde_json::json!({ "hello": "world" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "JSESSIONID=ajax:123; Path=/")
                    .set_body_string("{\"ok\":true}"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = OutgoingRequest::post(format!("{}/echo", server.uri()))
            .param("key", "abc")
            .json(serde_json::json!({ "hello": "world" }));
        let response = client.execute(request).await.unwrap();

        assert!(response.is_success());
        assert_eq!(response.cookies.get("JSESSIONID").unwrap(), "ajax:123");
        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body["ok"], true);
    }
}
