//! Settings structures for Scout-RS configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure matching `settings.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub linkedin: LinkedinSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    ///
    /// Credential variables keep the names the service has always used
    /// (`GEMINI_API_KEY`, `LINKEDIN_USERNAME`, `LINKEDIN_PASSWORD`, `MOCK_MODE`);
    /// server knobs use the `SCOUT_` prefix.
    pub fn merge_env(&mut self) {
        self.merge_from(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary key lookup
    pub fn merge_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SCOUT_DEBUG") {
            self.general.debug = parse_flag(&val);
        }
        if let Some(val) = lookup("SCOUT_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("SCOUT_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("GEMINI_API_KEY") {
            self.llm.api_key = Some(val);
        }
        if let Some(val) = lookup("GEMINI_MODEL") {
            self.llm.model = val;
        }
        if let Some(val) = lookup("LINKEDIN_USERNAME") {
            self.linkedin.username = Some(val);
        }
        if let Some(val) = lookup("LINKEDIN_PASSWORD") {
            self.linkedin.password = Some(val);
        }
        if let Some(val) = lookup("MOCK_MODE") {
            self.linkedin.mock_mode = parse_flag(&val);
        }
    }

    /// Whether the service substitutes fixed sample records for live search
    pub fn mock_mode(&self) -> bool {
        self.linkedin.mock_mode
    }
}

fn parse_flag(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Service name reported on `/`
    pub service_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            service_name: "Scout-RS".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Origins allowed by the CORS layer
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_address: "127.0.0.1".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "https://solo-founder-ai.vercel.app".to_string(),
            ],
        }
    }
}

/// Language model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Gemini API key
    pub api_key: Option<String>,
    /// Model name used for both keyword generation and ranking
    pub model: String,
    /// API base URL
    pub base_url: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

/// LinkedIn search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedinSettings {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Base URL for both authentication and the Voyager API
    pub base_url: String,
    /// Serve fixed sample records instead of calling LinkedIn
    pub mock_mode: bool,
    /// Maximum number of records requested per search
    pub search_limit: usize,
}

impl Default for LinkedinSettings {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            base_url: "https://www.linkedin.com".to_string(),
            mock_mode: false,
            search_limit: 20,
        }
    }
}

impl LinkedinSettings {
    /// Username and password, if both are present and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|s| !s.trim().is_empty())?;
        let password = self.password.as_deref().filter(|s| !s.is_empty())?;
        Some((username, password))
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Max idle connections kept per host
    pub pool_maxsize: usize,
    /// Appended to the generated user agent
    pub useragent_suffix: Option<String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 30.0,
            pool_maxsize: 10,
            useragent_suffix: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8000);
        assert!(!settings.general.debug);
        assert!(!settings.mock_mode());
        assert_eq!(settings.linkedin.search_limit, 20);
        assert!(settings.llm.api_key.is_none());
    }

    #[test]
    fn test_merge_overrides() {
        let env: HashMap<&str, &str> = [
            ("GEMINI_API_KEY", "gk"),
            ("LINKEDIN_USERNAME", "founder@example.com"),
            ("LINKEDIN_PASSWORD", "hunter2"),
            ("MOCK_MODE", "True"),
            ("SCOUT_PORT", "9100"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.merge_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.llm.api_key.as_deref(), Some("gk"));
        assert!(settings.mock_mode());
        assert_eq!(settings.server.port, 9100);
        assert_eq!(
            settings.linkedin.credentials(),
            Some(("founder@example.com", "hunter2"))
        );
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let mut settings = Settings::default();
        settings.merge_from(|key| (key == "SCOUT_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(settings.server.port, 8000);
    }

    #[test]
    fn test_blank_credentials_are_missing() {
        let mut settings = Settings::default();
        settings.linkedin.username = Some("  ".to_string());
        settings.linkedin.password = Some("pw".to_string());
        assert!(settings.linkedin.credentials().is_none());
    }

    #[test]
    fn test_yaml_partial_sections() {
        let yaml = "linkedin:\n  mock_mode: true\nserver:\n  port: 8080\n";
        let settings: Settings = assert_ok!(serde_yaml::from_str(yaml));
        assert!(settings.mock_mode());
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.llm.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir()
            .join(format!("scout-rs-settings-{}.yml", std::process::id()));
        let yaml = "general:\n  debug: true\nlinkedin:\n  search_limit: 5\n";
        std::fs::write(&path, yaml).unwrap();

        let settings = assert_ok!(Settings::from_file(&path));
        std::fs::remove_file(&path).ok();
        assert!(settings.general.debug);
        assert_eq!(settings.linkedin.search_limit, 5);
        assert_eq!(settings.outgoing.request_timeout, 30.0);
    }

    #[test]
    fn test_from_file_errors() {
        assert_err!(Settings::from_file("/nonexistent/scout-rs/settings.yml"));
        assert_err!(serde_yaml::from_str::<Settings>("server:\n  port: [1, 2]\n"));
    }
}
