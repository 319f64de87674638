#![warn(missing_docs)]

//! ToneShift HTTP API
//!
//! Serves `POST /api/adjust-tone` in front of the upstream language model,
//! with per-client rate limiting, a bounded response cache, OpenAPI docs and
//! the static editor client.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ConfigLoader, ServerConfig, UpstreamConfig};
pub use error::{ApiError, ApiResult};
pub use server::ApiServer;
pub use state::AppState;
