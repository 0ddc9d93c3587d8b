//! LinkedIn Voyager API client
//!
//! Logs in once with username/password and then issues people and company
//! searches through the Voyager GraphQL search-clusters endpoint, the same
//! endpoint the LinkedIn web app uses for its search results page.

use super::{NetworkSearch, RawRecord, SearchError};
use crate::network::{HttpClient, OutgoingRequest, UpstreamResponse};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

const AUTH_PATH: &str = "/uas/authenticate";
const GRAPHQL_PATH: &str = "/voyager/api/graphql";
const SEARCH_QUERY_ID: &str = "voyagerSearchDashClusters.b0928897b71bd00a5a7291755dcd64f0";
const ENTITY_RESULT_TYPE: &str = "com.linkedin.voyager.dash.search.EntityResultViewModel";

/// Results per search page
const PAGE_SIZE: usize = 10;

static URN_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"urn:li:(?:fsd_profile|fsd_company|company|member):([^,)\s]+)").unwrap()
});

/// Kind of entity a search targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResultType {
    People,
    Companies,
}

impl ResultType {
    fn as_str(self) -> &'static str {
        match self {
            ResultType::People => "PEOPLE",
            ResultType::Companies => "COMPANIES",
        }
    }
}

/// Authenticated LinkedIn session
pub struct LinkedinClient {
    client: HttpClient,
    base_url: String,
    csrf_token: String,
}

impl LinkedinClient {
    /// Log in and return a client bound to the new session
    pub async fn authenticate(
        client: HttpClient,
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, SearchError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let auth_url = format!("{}{}", base_url, AUTH_PATH);

        // The first call only exists to obtain a JSESSIONID cookie
        let bootstrap = client
            .execute(with_auth_headers(OutgoingRequest::get(&auth_url)))
            .await?;
        let jsessionid = bootstrap
            .cookies
            .get("JSESSIONID")
            .map(|v| v.trim_matches('"').to_string())
            .ok_or_else(|| SearchError::Auth("no JSESSIONID cookie in response".to_string()))?;

        let mut form = HashMap::new();
        form.insert("session_key".to_string(), username.to_string());
        form.insert("session_password".to_string(), password.to_string());
        form.insert("JSESSIONID".to_string(), jsessionid.clone());

        let response = client
            .execute(with_auth_headers(OutgoingRequest::post(&auth_url)).form(form))
            .await?;

        check_login(&response)?;

        Ok(Self {
            client,
            base_url,
            csrf_token: jsessionid,
        })
    }

    async fn search(
        &self,
        keywords: &str,
        result_type: ResultType,
        limit: usize,
    ) -> Result<Vec<Value>, SearchError> {
        let mut results: Vec<Value> = Vec::new();

        while results.len() < limit {
            let url = format!(
                "{}{}?variables={}&queryId={}",
                self.base_url,
                GRAPHQL_PATH,
                search_variables(keywords, result_type, results.len()),
                SEARCH_QUERY_ID
            );
            let request = OutgoingRequest::get(url)
                .header("csrf-token", self.csrf_token.as_str())
                .header("accept", "application/vnd.linkedin.normalized+json+2.1")
                .header("x-restli-protocol-version", "2.0.0")
                .header("x-li-lang", "en_US");

            let response = self.client.execute(request).await?;
            if response.is_rate_limited() {
                return Err(SearchError::RateLimited);
            }
            if !response.is_success() {
                return Err(SearchError::Status {
                    status: response.status,
                    body: response.snippet().to_string(),
                });
            }

            let json: Value = response
                .json()
                .map_err(|e| SearchError::Parse(e.to_string()))?;
            let page = entity_results(&json);

            debug!(
                "LinkedIn {} page at {} returned {} results",
                result_type.as_str(),
                results.len(),
                page.len()
            );

            let last_page = page.len() < PAGE_SIZE;
            results.extend(page);
            if last_page {
                break;
            }
        }

        results.truncate(limit);
        Ok(results)
    }
}

#[async_trait]
impl NetworkSearch for LinkedinClient {
    fn name(&self) -> &str {
        "linkedin"
    }

    async fn search_people(
        &self,
        keywords: &str,
        limit: usize,
    ) -> Result<Vec<RawRecord>, SearchError> {
        let items = self.search(keywords, ResultType::People, limit).await?;
        Ok(items.iter().map(person_record).collect())
    }

    async fn search_companies(
        &self,
        keywords: &str,
        limit: usize,
    ) -> Result<Vec<RawRecord>, SearchError> {
        let items = self.search(keywords, ResultType::Companies, limit).await?;
        Ok(items.iter().map(company_record).collect())
    }
}

fn with_auth_headers(request: OutgoingRequest) -> OutgoingRequest {
    request
        .header(
            "X-Li-User-Agent",
            "LIAuthLibrary:0.0.3 com.linkedin.android:4.1.881 Asus_ASUS_Z01QD:android_9",
        )
        .header("X-User-Language", "en")
        .header("X-User-Locale", "en_US")
        .header("Accept-Language", "en-us")
}

fn check_login(response: &UpstreamResponse) -> Result<(), SearchError> {
    if response.status == 401 {
        return Err(SearchError::Auth("invalid credentials".to_string()));
    }
    if !response.is_success() {
        return Err(SearchError::Status {
            status: response.status,
            body: response.snippet().to_string(),
        });
    }

    let json: Value = response
        .json()
        .map_err(|e| SearchError::Parse(e.to_string()))?;
    match json.get("login_result").and_then(|v| v.as_str()) {
        Some("PASS") => Ok(()),
        Some(other) => Err(SearchError::Auth(format!("login result {}", other))),
        None => Err(SearchError::Auth("missing login_result".to_string())),
    }
}

/// Rest.li encoded `variables` parameter for a search-clusters query
fn search_variables(keywords: &str, result_type: ResultType, start: usize) -> String {
    format!(
        "(start:{},origin:GLOBAL_SEARCH_HEADER,query:(keywords:{},flagshipSearchIntent:SEARCH_SRP,\
         queryParameters:List((key:resultType,value:List({}))),includeFiltersInResponse:false))",
        start,
        urlencoding::encode(keywords),
        result_type.as_str()
    )
}

/// Pull entity results out of a search-clusters response
///
/// Results are inlined under `data.searchDashClustersByAll` for plain JSON
/// responses, and listed in `included` for normalized responses.
fn entity_results(json: &Value) -> Vec<Value> {
    let inline: Vec<Value> = json
        .pointer("/data/searchDashClustersByAll/elements")
        .and_then(|e| e.as_array())
        .into_iter()
        .flatten()
        .filter_map(|cluster| cluster.get("items").and_then(|i| i.as_array()))
        .flatten()
        .filter_map(|item| item.pointer("/item/entityResult"))
        .filter(|e| e.is_object())
        .cloned()
        .collect();

    if !inline.is_empty() {
        return inline;
    }

    json.get("included")
        .and_then(|i| i.as_array())
        .into_iter()
        .flatten()
        .filter(|e| e.get("$type").and_then(|t| t.as_str()) == Some(ENTITY_RESULT_TYPE))
        .cloned()
        .collect()
}

fn text_field(item: &Value, key: &str) -> Option<Value> {
    item.get(key)
        .and_then(|f| f.get("text"))
        .and_then(|t| t.as_str())
        .map(|s| Value::String(s.to_string()))
}

/// Identifier portion of a URN such as
/// `urn:li:fsd_entityResultViewModel:(urn:li:fsd_profile:ACoAAB,SEARCH_SRP,DEFAULT)`
fn urn_id(urn: &str) -> Option<String> {
    if let Some(caps) = URN_ID.captures(urn) {
        return Some(caps[1].to_string());
    }
    urn.rsplit(':')
        .next()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn person_record(item: &Value) -> RawRecord {
    let mut record = RawRecord::new();
    if let Some(id) = item
        .get("entityUrn")
        .and_then(|u| u.as_str())
        .and_then(urn_id)
    {
        record.insert("urn_id".to_string(), Value::String(id));
    }
    if let Some(name) = text_field(item, "title") {
        record.insert("name".to_string(), name);
    }
    if let Some(jobtitle) = text_field(item, "primarySubtitle") {
        record.insert("jobtitle".to_string(), jobtitle);
    }
    if let Some(location) = text_field(item, "secondarySubtitle") {
        record.insert("location".to_string(), location);
    }
    record
}

fn company_record(item: &Value) -> RawRecord {
    let mut record = RawRecord::new();
    let urn = item
        .get("trackingUrn")
        .or_else(|| item.get("entityUrn"))
        .and_then(|u| u.as_str());
    if let Some(id) = urn.and_then(urn_id) {
        record.insert("urn_id".to_string(), Value::String(id));
    }
    if let Some(name) = text_field(item, "title") {
        record.insert("name".to_string(), name);
    }
    if let Some(headline) = text_field(item, "primarySubtitle") {
        record.insert("headline".to_string(), headline);
    }
    if let Some(subline) = text_field(item, "secondarySubtitle") {
        record.insert("subline".to_string(), subline);
    }
    record
}
