//! Investor and competitor pipelines
//!
//! Each request runs keywords → search → normalize → rank, once, in order.

use super::models::{
    CompanyInput, Competitor, CompetitorResponse, Investor, InvestorResponse, RankContext,
};
use super::normalize::{normalize_competitors, normalize_investors, without_placeholders};
use super::query::QueryBuilder;
use super::rank::{LlmRanker, Ranker};
use crate::error::{Result, ScoutError};
use crate::linkedin::NetworkSearch;
use crate::llm::LanguageModel;
use std::sync::Arc;
use tracing::info;

/// Default number of records requested from the network search
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Runs the two discovery pipelines against injected collaborators
pub struct Scout {
    queries: QueryBuilder,
    network: Option<Arc<dyn NetworkSearch>>,
    investor_ranker: Arc<dyn Ranker<Investor>>,
    competitor_ranker: Arc<dyn Ranker<Competitor>>,
    search_limit: usize,
}

impl Scout {
    /// Pipelines that use `llm` for both keywords and ranking
    pub fn new(llm: Arc<dyn LanguageModel>, network: Option<Arc<dyn NetworkSearch>>) -> Self {
        let ranker = Arc::new(LlmRanker::new(llm.clone()));
        Self {
            queries: QueryBuilder::new(llm),
            network,
            investor_ranker: ranker.clone(),
            competitor_ranker: ranker,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Replace the investor ranker
    pub fn with_investor_ranker(mut self, ranker: Arc<dyn Ranker<Investor>>) -> Self {
        self.investor_ranker = ranker;
        self
    }

    /// Replace the competitor ranker
    pub fn with_competitor_ranker(mut self, ranker: Arc<dyn Ranker<Competitor>>) -> Self {
        self.competitor_ranker = ranker;
        self
    }

    /// Set the number of records requested per search
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// Whether a network search client is available
    pub fn has_network(&self) -> bool {
        self.network.is_some()
    }

    fn network(&self) -> Result<&dyn NetworkSearch> {
        self.network.as_deref().ok_or(ScoutError::NetworkUnavailable)
    }

    fn validate(input: &CompanyInput) -> Result<()> {
        if input.description.trim().is_empty() {
            return Err(ScoutError::Validation(
                "description must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Find people likely to invest in the described company
    pub async fn find_investors(&self, input: &CompanyInput) -> Result<InvestorResponse> {
        Self::validate(input)?;
        let network = self.network()?;

        let keywords = self.queries.investor_query(&input.description).await?;
        let records = network.search_people(&keywords, self.search_limit).await?;
        info!(
            "{} returned {} people for '{}'",
            network.name(),
            records.len(),
            keywords
        );

        let investors = normalize_investors(&records);
        if investors.is_empty() {
            return Ok(InvestorResponse::none_found());
        }

        let ranked = self
            .investor_ranker
            .rank(investors, &RankContext::from_input(input))
            .await;
        let ranked = without_placeholders(ranked);
        if ranked.is_empty() {
            return Ok(InvestorResponse::none_found());
        }

        Ok(InvestorResponse::found(ranked))
    }

    /// Find companies similar to the described company
    pub async fn find_competitors(&self, input: &CompanyInput) -> Result<CompetitorResponse> {
        Self::validate(input)?;
        let network = self.network()?;

        let keyword = self.queries.competitor_query(&input.description).await?;
        let records = network
            .search_companies(&keyword, self.search_limit)
            .await?;
        info!(
            "{} returned {} companies for '{}'",
            network.name(),
            records.len(),
            keyword
        );

        let competitors = normalize_competitors(&records);
        if competitors.is_empty() {
            return Ok(CompetitorResponse::none_found());
        }

        let ranked = self
            .competitor_ranker
            .rank(competitors, &RankContext::from_input(input))
            .await;
        if ranked.is_empty() {
            return Ok(CompetitorResponse::none_found());
        }

        Ok(CompetitorResponse::found(ranked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkedin::{MockNetworkSearch, RawRecord, SearchError};
    use crate::llm::LlmError;
    use crate::scout::models::CompanySize;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers keyword prompts with `keywords` and ranking prompts with `ranking`
    struct ScriptedModel {
        keywords: &'static str,
        ranking: &'static str,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(keywords: &'static str, ranking: &'static str) -> Arc<Self> {
            Arc::new(Self {
                keywords,
                ranking,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, prompt: &str) -> std::result::Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if prompt.contains("Rank these") {
                Ok(self.ranking.to_string())
            } else {
                Ok(self.keywords.to_string())
            }
        }
    }

    /// Records the keywords it was asked for and returns fixed records
    struct FixedSearch {
        people: Vec<RawRecord>,
        fail: bool,
        keywords: Mutex<Vec<String>>,
    }

    impl FixedSearch {
        fn new(people: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                people: people
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|v| v.as_object().unwrap().clone())
                    .collect(),
                fail: false,
                keywords: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                people: Vec::new(),
                fail: true,
                keywords: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl NetworkSearch for FixedSearch {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn search_people(
            &self,
            keywords: &str,
            limit: usize,
        ) -> std::result::Result<Vec<RawRecord>, SearchError> {
            self.keywords.lock().unwrap().push(keywords.to_string());
            if self.fail {
                return Err(SearchError::Http("connection reset".to_string()));
            }
            Ok(self.people.iter().take(limit).cloned().collect())
        }

        async fn search_companies(
            &self,
            keywords: &str,
            limit: usize,
        ) -> std::result::Result<Vec<RawRecord>, SearchError> {
            self.search_people(keywords, limit).await
        }
    }

    const MOCK_RANKING: &str = r#"[
        {"name":"Marcus Oyelaran","title":"Angel Investor | B2B SaaS and AI","location":"Chicago, Illinois, United States","profile_url":"https://www.linkedin.com/in/ACoAAEf5GhVCr8Sq3nU0","relevance_score":71},
        {"name":"Priya Raman","title":"Partner at Freightline Ventures | Supply Chain & Logistics Investor","location":"San Francisco Bay Area","profile_url":"https://www.linkedin.com/in/ACoAABc4DxUBq7Rp2mT9","relevance_score":94}
    ]"#;

    #[tokio::test]
    async fn test_mock_mode_returns_two_ranked_investors() {
        let llm = ScriptedModel::new("Supply Chain, AI", MOCK_RANKING);
        let scout = Scout::new(llm.clone(), Some(Arc::new(MockNetworkSearch::new())));

        let input = CompanyInput::new("AI-powered supply chain SaaS for logistics companies");
        let response = scout.find_investors(&input).await.unwrap();

        assert!(response.message.is_none());
        let names: Vec<&str> = response.investors.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Priya Raman", "Marcus Oyelaran"]);
        assert_eq!(response.investors[0].relevance_score, 94.0);

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("https://www.linkedin.com/in/ACoAABc4DxUBq7Rp2mT9"));
    }

    #[tokio::test]
    async fn test_investor_keywords_get_suffix() {
        let search = FixedSearch::new(serde_json::json!([]));
        let scout = Scout::new(ScriptedModel::new("Logistics, SaaS", "[]"), Some(search.clone()));

        scout
            .find_investors(&CompanyInput::new("freight software"))
            .await
            .unwrap();
        assert_eq!(
            search.keywords.lock().unwrap().as_slice(),
            ["Logistics SaaS Investor"]
        );
    }

    #[tokio::test]
    async fn test_empty_search_is_not_an_error() {
        let search = FixedSearch::new(serde_json::json!([]));
        let scout = Scout::new(ScriptedModel::new("AI, SaaS", "[]"), Some(search));

        let response = scout
            .find_investors(&CompanyInput::new("anything"))
            .await
            .unwrap();
        assert_eq!(response.message.as_deref(), Some("No investors found."));
        assert!(response.investors.is_empty());
    }

    #[tokio::test]
    async fn test_only_placeholders_is_not_found() {
        let search = FixedSearch::new(serde_json::json!([
            { "urn_id": "x", "name": "LinkedIn Member" }
        ]));
        let llm = ScriptedModel::new("AI, SaaS", "[]");
        let scout = Scout::new(llm.clone(), Some(search));

        let response = scout
            .find_investors(&CompanyInput::new("anything"))
            .await
            .unwrap();
        assert!(response.investors.is_empty());
        // No ranking call when nothing survives normalization
        assert_eq!(llm.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_placeholders_removed_from_ranked_output() {
        let search = FixedSearch::new(serde_json::json!([
            { "urn_id": "g", "name": "Grace Hopper" }
        ]));
        let ranking = r#"[{"name":"LinkedIn Member","relevance_score":99},{"name":"Grace Hopper","relevance_score":60}]"#;
        let scout = Scout::new(ScriptedModel::new("AI, SaaS", ranking), Some(search));

        let response = scout
            .find_investors(&CompanyInput::new("anything"))
            .await
            .unwrap();
        assert_eq!(response.investors.len(), 1);
        assert_eq!(response.investors[0].name, "Grace Hopper");
    }

    #[tokio::test]
    async fn test_unparseable_ranking_keeps_normalized_order() {
        let scout = Scout::new(
            ScriptedModel::new("[\"Logistics\"]", "Sorry, I can't help with that."),
            Some(Arc::new(MockNetworkSearch::new())),
        );

        let input = CompanyInput::new("freight").with_size(CompanySize::Label("11-50".into()));
        let response = scout.find_competitors(&input).await.unwrap();

        let names: Vec<&str> = response.competitors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Cargoflux", "RouteWise Analytics"]);
        assert_eq!(
            response.competitors[1].profile_url,
            "https://www.linkedin.com/company/2871546"
        );
        assert!(response.competitors.iter().all(|c| c.similarity_score == 0.0));
    }

    #[tokio::test]
    async fn test_empty_competitor_ranking_is_not_found() {
        let scout = Scout::new(
            ScriptedModel::new("[\"Logistics\"]", "[]"),
            Some(Arc::new(MockNetworkSearch::new())),
        );

        let response = scout
            .find_competitors(&CompanyInput::new("freight"))
            .await
            .unwrap();
        assert_eq!(response.message.as_deref(), Some("No competitors found."));
        assert!(response.competitors.is_empty());
    }

    #[tokio::test]
    async fn test_empty_investor_ranking_is_not_found() {
        let scout = Scout::new(
            ScriptedModel::new("Supply Chain, AI", "[]"),
            Some(Arc::new(MockNetworkSearch::new())),
        );

        let response = scout
            .find_investors(&CompanyInput::new("freight"))
            .await
            .unwrap();
        assert_eq!(response.message.as_deref(), Some("No investors found."));
    }

    #[tokio::test]
    async fn test_missing_network_is_unavailable() {
        let llm = ScriptedModel::new("AI, SaaS", "[]");
        let scout = Scout::new(llm.clone(), None);

        let err = scout
            .find_competitors(&CompanyInput::new("anything"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::NetworkUnavailable));
        assert!(llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_surfaces() {
        let scout = Scout::new(ScriptedModel::new("AI, SaaS", "[]"), Some(FixedSearch::failing()));
        let err = scout
            .find_investors(&CompanyInput::new("anything"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::Search(_)));
    }

    #[tokio::test]
    async fn test_blank_description_rejected() {
        let scout = Scout::new(
            ScriptedModel::new("AI, SaaS", "[]"),
            Some(Arc::new(MockNetworkSearch::new())),
        );
        let err = scout
            .find_investors(&CompanyInput::new("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::Validation(_)));
    }

    #[tokio::test]
    async fn test_custom_ranker_replaces_model_ranking() {
        struct Reverse;

        #[async_trait]
        impl Ranker<Competitor> for Reverse {
            async fn rank(
                &self,
                mut candidates: Vec<Competitor>,
                _context: &RankContext<'_>,
            ) -> Vec<Competitor> {
                candidates.reverse();
                candidates
            }
        }

        let llm = ScriptedModel::new("[\"Logistics\"]", "[]");
        let scout = Scout::new(llm.clone(), Some(Arc::new(MockNetworkSearch::new())))
            .with_competitor_ranker(Arc::new(Reverse))
            .with_search_limit(5);

        let response = scout
            .find_competitors(&CompanyInput::new("freight"))
            .await
            .unwrap();
        assert_eq!(response.competitors[0].name, "RouteWise Analytics");
        assert_eq!(llm.prompts.lock().unwrap().len(), 1);
    }
}
