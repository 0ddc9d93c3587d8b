//! Investor and competitor discovery
//!
//! A company description goes in; the language model turns it into search
//! keywords, the network search returns raw records, those are normalized and
//! then ranked by the language model again.

pub mod models;
pub mod normalize;
mod pipeline;
pub mod prompts;
pub mod query;
pub mod rank;

pub use models::{
    Candidate, CompanyInput, CompanySize, Competitor, CompetitorResponse, Investor,
    InvestorResponse, RankContext,
};
pub use pipeline::{Scout, DEFAULT_SEARCH_LIMIT};
pub use query::QueryBuilder;
pub use rank::{LlmRanker, RankedReply, Ranker};
