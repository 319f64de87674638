//! Response models owned by the server

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `healthy` while the server answers
    pub status: String,
    /// Crate version
    pub version: String,
    /// Seconds since start
    pub uptime: u64,
    /// Entries in the response cache
    pub cache_entries: usize,
    /// Cache hit rate as a percentage
    pub cache_hit_rate: f64,
    /// Clients with an open rate limit window
    pub tracked_clients: usize,
}
