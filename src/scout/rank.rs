//! Candidate ranking
//!
//! [`Ranker`] is the seam between the pipelines and whatever orders the
//! candidates. [`LlmRanker`] asks the language model; its reply goes through
//! [`parse_ranked_reply`] and any unusable reply falls back to the input order.

use super::models::{Candidate, RankContext};
use crate::llm::LanguageModel;
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Orders candidates for a company
#[async_trait]
pub trait Ranker<C: Candidate>: Send + Sync {
    /// Return the candidates ordered by relevance, best first
    ///
    /// Implementations never fail; when they cannot rank they return the
    /// input unchanged.
    async fn rank(&self, candidates: Vec<C>, context: &RankContext<'_>) -> Vec<C>;
}

/// Outcome of parsing a ranking reply
#[derive(Debug, Clone, PartialEq)]
pub enum RankedReply<C> {
    /// A list of records, each with a numeric score
    Parsed(Vec<C>),
    /// Anything else, with the reason
    Unparseable(String),
}

/// The substring from the first `[` to the last `]`, if any
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

/// Numeric score from a number or numeric string, clamped to `[0, 100]`
fn score_value(value: &Value) -> Option<f64> {
    let score = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    score.is_finite().then(|| score.clamp(0.0, 100.0))
}

/// Parse a model reply into ranked candidates
///
/// Text around the JSON array is ignored. Every element must be an object
/// carrying a numeric `C::SCORE_FIELD`; other missing fields become
/// `"Unknown"`.
pub fn parse_ranked_reply<C: Candidate>(reply: &str) -> RankedReply<C> {
    let Some(json) = extract_json_array(reply) else {
        return RankedReply::Unparseable("no JSON array in reply".to_string());
    };

    let value: Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(e) => return RankedReply::Unparseable(format!("invalid JSON: {}", e)),
    };

    let Value::Array(items) = value else {
        return RankedReply::Unparseable("reply is not a list".to_string());
    };

    let mut ranked = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return RankedReply::Unparseable(format!("element {} is not an object", i));
        };
        let Some(score) = object.get(C::SCORE_FIELD).and_then(score_value) else {
            return RankedReply::Unparseable(format!(
                "element {} has no numeric {}",
                i,
                C::SCORE_FIELD
            ));
        };
        ranked.push(C::from_ranked(object, score));
    }

    RankedReply::Parsed(ranked)
}

/// Stable sort, highest score first
pub fn sort_by_score<C: Candidate>(candidates: &mut [C]) {
    candidates.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal));
}

/// Put back the normalized `profile_url` of every ranked record whose name
/// matches an input candidate
///
/// Records the model made up keep whatever URL it gave them.
pub fn restore_profile_urls<C: Candidate>(candidates: &[C], ranked: &mut [C]) {
    let urls: HashMap<&str, &str> = candidates
        .iter()
        .rev()
        .map(|c| (c.name().trim(), c.profile_url()))
        .collect();

    for record in ranked.iter_mut() {
        if let Some(url) = urls.get(record.name().trim()) {
            if record.profile_url() != *url {
                debug!("Restoring profile URL for {}", record.name());
                record.set_profile_url(url.to_string());
            }
        }
    }
}

/// Ranks candidates by asking the language model
pub struct LlmRanker {
    llm: Arc<dyn LanguageModel>,
}

impl LlmRanker {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl<C: Candidate> Ranker<C> for LlmRanker {
    async fn rank(&self, candidates: Vec<C>, context: &RankContext<'_>) -> Vec<C> {
        if candidates.is_empty() {
            return candidates;
        }

        let candidates_json = match serde_json::to_string_pretty(&candidates) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialize candidates for ranking: {}", e);
                return candidates;
            }
        };

        let prompt = C::ranking_prompt(context, &candidates_json);
        let reply = match self.llm.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("{} returned an empty ranking, using unranked list", self.llm.name());
                return candidates;
            }
            Err(e) => {
                warn!("Ranking call failed, using unranked list: {}", e);
                return candidates;
            }
        };

        match parse_ranked_reply::<C>(&reply) {
            RankedReply::Parsed(mut ranked) => {
                restore_profile_urls(&candidates, &mut ranked);
                sort_by_score(&mut ranked);
                debug!("Ranked {} candidates", ranked.len());
                ranked
            }
            RankedReply::Unparseable(reason) => {
                warn!("Unusable ranking reply ({}), using unranked list", reason);
                candidates
            }
        }
    }
}
