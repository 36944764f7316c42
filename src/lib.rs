//! Wellness Agent: rule-based wellness advice over HTTP.
//!
//! Queries are routed by keyword to one of six canned advice texts. The
//! library exposes the router so it can be served by `main.rs` or driven
//! directly in tests.

pub mod advice;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

pub use advice::{classify, Advisor, Topic};
pub use error::AppError;
pub use routes::{apply_service_layers, create_router};
pub use state::AppState;
