//! Mapping raw search records onto the candidate schema

use super::models::{text_or_unknown, Competitor, Investor};
use crate::linkedin::RawRecord;

/// Display name LinkedIn uses for profiles outside the searcher's network
pub const PLACEHOLDER_NAME: &str = "LinkedIn Member";

const PERSON_PROFILE_BASE: &str = "https://www.linkedin.com/in/";
const COMPANY_PROFILE_BASE: &str = "https://www.linkedin.com/company/";

/// Whether `name` is the private-profile placeholder, ignoring case
pub fn is_placeholder(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(PLACEHOLDER_NAME)
}

pub fn person_profile_url(urn_id: &str) -> String {
    format!("{}{}", PERSON_PROFILE_BASE, urn_id)
}

pub fn company_profile_url(urn_id: &str) -> String {
    format!("{}{}", COMPANY_PROFILE_BASE, urn_id)
}

fn urn_id(record: &RawRecord) -> String {
    text_or_unknown(record, &["urn_id"])
}

/// Investors from people records, without placeholder profiles
pub fn normalize_investors(records: &[RawRecord]) -> Vec<Investor> {
    records
        .iter()
        .map(|record| Investor {
            name: text_or_unknown(record, &["name"]),
            location: text_or_unknown(record, &["location"]),
            title: text_or_unknown(record, &["jobtitle", "title"]),
            profile_url: person_profile_url(&urn_id(record)),
            relevance_score: 0.0,
        })
        .filter(|investor| !is_placeholder(&investor.name))
        .collect()
}

/// Competitors from company records
pub fn normalize_competitors(records: &[RawRecord]) -> Vec<Competitor> {
    records
        .iter()
        .map(|record| Competitor {
            name: text_or_unknown(record, &["name"]),
            industry: text_or_unknown(record, &["headline", "industry"]),
            size: text_or_unknown(record, &["subline", "size"]),
            profile_url: company_profile_url(&urn_id(record)),
            similarity_score: 0.0,
        })
        .collect()
}

/// Drop placeholder profiles from an already ranked list
pub fn without_placeholders(investors: Vec<Investor>) -> Vec<Investor> {
    investors
        .into_iter()
        .filter(|investor| !is_placeholder(&investor.name))
        .collect()
}
