//! HTTP networking module
//!
//! Provides the outgoing HTTP client used to reach Gemini and LinkedIn.

mod client;
mod request;
mod user_agent;

pub use client::HttpClient;
pub use request::{HttpMethod, OutgoingRequest, RequestBody, UpstreamResponse};
pub use user_agent::generate_user_agent;
