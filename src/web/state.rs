//! Application state shared across handlers

use crate::config::Settings;
use crate::linkedin::NetworkSearch;
use crate::llm::LanguageModel;
use crate::scout::Scout;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Investor and competitor pipelines
    pub scout: Arc<Scout>,
}

impl AppState {
    /// Wire the pipelines from the process-wide clients
    pub fn new(
        settings: Settings,
        llm: Arc<dyn LanguageModel>,
        network: Option<Arc<dyn NetworkSearch>>,
    ) -> Self {
        let scout = Scout::new(llm, network).with_search_limit(settings.linkedin.search_limit);
        Self::with_scout(settings, scout)
    }

    /// State around an already configured [`Scout`]
    pub fn with_scout(settings: Settings, scout: Scout) -> Self {
        Self {
            settings: Arc::new(settings),
            scout: Arc::new(scout),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.settings.general.service_name
    }

    pub fn mock_mode(&self) -> bool {
        self.settings.mock_mode()
    }
}
