//! Scout-RS: investor and competitor discovery for early-stage companies
//!
//! A company description is turned into search keywords by a language model,
//! matched against LinkedIn people or company search, and the results are
//! ranked by the language model before being returned as JSON.

pub mod config;
pub mod error;
pub mod linkedin;
pub mod llm;
pub mod network;
pub mod scout;
pub mod web;

pub use config::Settings;
pub use error::{Result, ScoutError};
pub use scout::{CompanyInput, Scout};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
