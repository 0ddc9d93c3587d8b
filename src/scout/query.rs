//! Search keyword generation
//!
//! Asks the language model for keywords and cleans up whatever list
//! formatting it wraps them in.

use super::prompts;
use super::rank::extract_json_array;
use crate::error::{Result, ScoutError};
use crate::llm::LanguageModel;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::info;

/// Appended to investor keywords before searching people
pub const INVESTOR_SUFFIX: &str = "Investor";

/// Leading bullets, numbering and a "Keywords:" label
static LEADING_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:[-*•]+|\d+[.)])?\s*(?:keywords?\s*:)?\s*").unwrap());

/// Builds search keywords from a company description
#[derive(Clone)]
pub struct QueryBuilder {
    llm: Arc<dyn LanguageModel>,
}

impl QueryBuilder {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    /// Two keywords followed by [`INVESTOR_SUFFIX`], e.g. `"Logistics SaaS Investor"`
    pub async fn investor_query(&self, description: &str) -> Result<String> {
        let reply = self
            .llm
            .generate(&prompts::investor_keywords(description))
            .await?;
        let keywords = investor_keywords(&reply).ok_or(ScoutError::EmptyKeywords)?;
        info!("Investor search keywords: {}", keywords);
        Ok(keywords)
    }

    /// A single keyword, e.g. `"Logistics"`
    pub async fn competitor_query(&self, description: &str) -> Result<String> {
        let reply = self
            .llm
            .generate(&prompts::competitor_keyword(description))
            .await?;
        let keyword = competitor_keyword(&reply).ok_or(ScoutError::EmptyKeywords)?;
        info!("Competitor search keyword: {}", keyword);
        Ok(keyword)
    }
}

fn clean_keyword(raw: &str) -> String {
    let stripped = LEADING_NOISE.replace(raw, "");
    stripped
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '"' | '\'' | '`' | '*'))
        .collect::<String>()
        .trim()
        .trim_end_matches('.')
        .trim()
        .to_string()
}

/// First two keywords of the reply joined by a space, plus the suffix
pub fn investor_keywords(reply: &str) -> Option<String> {
    let keywords: Vec<String> = reply
        .split(|c| matches!(c, ',' | '\n' | ';'))
        .map(clean_keyword)
        .filter(|k| !k.is_empty())
        .take(2)
        .collect();

    if keywords.is_empty() {
        return None;
    }
    Some(format!("{} {}", keywords.join(" "), INVESTOR_SUFFIX))
}

/// First keyword of a `["Keyword"]` reply, or the first non-empty line
pub fn competitor_keyword(reply: &str) -> Option<String> {
    let from_json = extract_json_array(reply)
        .and_then(|json| serde_json::from_str::<Vec<serde_json::Value>>(json).ok())
        .and_then(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(clean_keyword)
                .find(|k| !k.is_empty())
        });

    from_json.or_else(|| {
        reply
            .lines()
            .map(clean_keyword)
            .find(|k| !k.is_empty())
    })
}
