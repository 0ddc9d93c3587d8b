//! Request and candidate data models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Literal substituted for any missing text field
pub const UNKNOWN: &str = "Unknown";

/// Request body shared by both search endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyInput {
    /// Free-text company description
    pub description: String,
    /// Company size, as a headcount or a label such as "11-50 employees"
    #[serde(default)]
    pub size: Option<CompanySize>,
}

impl CompanyInput {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            size: None,
        }
    }

    pub fn with_size(mut self, size: CompanySize) -> Self {
        self.size = Some(size);
        self
    }
}

/// Company size as sent by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompanySize {
    Count(u64),
    Label(String),
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanySize::Count(n) => write!(f, "{} employees", n),
            CompanySize::Label(label) => f.write_str(label.trim()),
        }
    }
}

/// What the ranker knows about the company being matched
#[derive(Debug, Clone, Copy)]
pub struct RankContext<'a> {
    pub description: &'a str,
    pub size: Option<&'a CompanySize>,
}

impl<'a> RankContext<'a> {
    pub fn from_input(input: &'a CompanyInput) -> Self {
        Self {
            description: &input.description,
            size: input.size.as_ref(),
        }
    }
}

/// A normalized investor or competitor record
pub trait Candidate: Serialize + Clone + Send + Sync + 'static {
    /// Name of the score field in the serialized record
    const SCORE_FIELD: &'static str;

    /// Relevance or similarity score in `[0, 100]`
    fn score(&self) -> f64;

    /// Display name
    fn name(&self) -> &str;

    fn profile_url(&self) -> &str;

    fn set_profile_url(&mut self, url: String);

    /// Build a record from a ranked reply object, defaulting missing fields
    fn from_ranked(object: &Map<String, Value>, score: f64) -> Self;

    /// Prompt asking the model to rank `candidates_json` for `context`
    fn ranking_prompt(context: &RankContext<'_>, candidates_json: &str) -> String;
}

/// A potential investor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub name: String,
    pub location: String,
    #[serde(alias = "jobtitle")]
    pub title: String,
    pub profile_url: String,
    #[serde(default)]
    pub relevance_score: f64,
}

impl Candidate for Investor {
    const SCORE_FIELD: &'static str = "relevance_score";

    fn score(&self) -> f64 {
        self.relevance_score
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn profile_url(&self) -> &str {
        &self.profile_url
    }

    fn set_profile_url(&mut self, url: String) {
        self.profile_url = url;
    }

    fn from_ranked(object: &Map<String, Value>, score: f64) -> Self {
        Self {
            name: text_or_unknown(object, &["name"]),
            location: text_or_unknown(object, &["location"]),
            title: text_or_unknown(object, &["title", "jobtitle"]),
            profile_url: text_or_unknown(object, &["profile_url"]),
            relevance_score: score,
        }
    }

    fn ranking_prompt(context: &RankContext<'_>, candidates_json: &str) -> String {
        super::prompts::investor_ranking(context, candidates_json)
    }
}

/// A potential competitor company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub industry: String,
    pub size: String,
    pub profile_url: String,
    #[serde(default)]
    pub similarity_score: f64,
}

impl Candidate for Competitor {
    const SCORE_FIELD: &'static str = "similarity_score";

    fn score(&self) -> f64 {
        self.similarity_score
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn profile_url(&self) -> &str {
        &self.profile_url
    }

    fn set_profile_url(&mut self, url: String) {
        self.profile_url = url;
    }

    fn from_ranked(object: &Map<String, Value>, score: f64) -> Self {
        Self {
            name: text_or_unknown(object, &["name"]),
            industry: text_or_unknown(object, &["industry"]),
            size: text_or_unknown(object, &["size"]),
            profile_url: text_or_unknown(object, &["profile_url"]),
            similarity_score: score,
        }
    }

    fn ranking_prompt(context: &RankContext<'_>, candidates_json: &str) -> String {
        super::prompts::competitor_ranking(context, candidates_json)
    }
}

/// First non-blank text value among `keys`, or [`UNKNOWN`]
///
/// Numbers and booleans are rendered as text; anything else counts as missing.
pub fn text_or_unknown(object: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Body of `POST /find-investors`
#[derive(Debug, Clone, Serialize)]
pub struct InvestorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub investors: Vec<Investor>,
}

impl InvestorResponse {
    pub fn found(investors: Vec<Investor>) -> Self {
        Self {
            message: None,
            investors,
        }
    }

    pub fn none_found() -> Self {
        Self {
            message: Some("No investors found.".to_string()),
            investors: Vec::new(),
        }
    }
}

/// Body of `POST /find-competitors`
#[derive(Debug, Clone, Serialize)]
pub struct CompetitorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub competitors: Vec<Competitor>,
}

impl CompetitorResponse {
    pub fn found(competitors: Vec<Competitor>) -> Self {
        Self {
            message: None,
            competitors,
        }
    }

    pub fn none_found() -> Self {
        Self {
            message: Some("No competitors found.".to_string()),
            competitors: Vec::new(),
        }
    }
}
