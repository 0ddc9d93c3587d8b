//! Fixed sample records served in mock mode

use super::{NetworkSearch, RawRecord, SearchError};
use async_trait::async_trait;
use serde_json::json;

/// Search client that ignores its keywords and returns two fixed records
pub struct MockNetworkSearch {
    people: Vec<RawRecord>,
    companies: Vec<RawRecord>,
}

impl MockNetworkSearch {
    pub fn new() -> Self {
        Self {
            people: vec![
                record(json!({
                    "urn_id": "ACoAABc4DxUBq7Rp2mT9",
                    "name": "Priya Raman",
                    "jobtitle": "Partner at Freightline Ventures | Supply Chain & Logistics Investor",
                    "location": "San Francisco Bay Area",
                })),
                record(json!({
                    "urn_id": "ACoAAEf5GhVCr8Sq3nU0",
                    "name": "Marcus Oyelaran",
                    "jobtitle": "Angel Investor | B2B SaaS and AI",
                    "location": "Chicago, Illinois, United States",
                })),
            ],
            companies: vec![
                record(json!({
                    "urn_id": "10482913",
                    "name": "Cargoflux",
                    "headline": "Logistics software",
                    "subline": "51-200 employees",
                })),
                record(json!({
                    "urn_id": "2871546",
                    "name": "RouteWise Analytics",
                    "headline": "Supply chain analytics",
                    "subline": "11-50 employees",
                })),
            ],
        }
    }
}

impl Default for MockNetworkSearch {
    fn default() -> Self {
        Self::new()
    }
}

fn record(value: serde_json::Value) -> RawRecord {
    match value {
        serde_json::Value::Object(map) => map,
        _ => RawRecord::new(),
    }
}

#[async_trait]
impl NetworkSearch for MockNetworkSearch {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search_people(
        &self,
        _keywords: &str,
        limit: usize,
    ) -> Result<Vec<RawRecord>, SearchError> {
        Ok(self.people.iter().take(limit).cloned().collect())
    }

    async fn search_companies(
        &self,
        _keywords: &str,
        limit: usize,
    ) -> Result<Vec<RawRecord>, SearchError> {
        Ok(self.companies.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_records() {
        let mock = MockNetworkSearch::new();
        let people = mock.search_people("anything", 20).await.unwrap();
        let companies = mock.search_companies("anything", 20).await.unwrap();

        assert_eq!(people.len(), 2);
        assert_eq!(companies.len(), 2);
        assert_eq!(people[0]["name"], "Priya Raman");
        assert!(companies.iter().all(|c| c.contains_key("urn_id")));
    }

    #[tokio::test]
    async fn test_limit_applies() {
        let mock = MockNetworkSearch::new();
        assert_eq!(mock.search_people("x", 1).await.unwrap().len(), 1);
    }
}
