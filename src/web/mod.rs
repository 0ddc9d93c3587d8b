//! Web server module
//!
//! JSON API over the investor and competitor pipelines.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
