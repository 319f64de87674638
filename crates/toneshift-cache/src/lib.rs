//! # ToneShift Cache
//!
//! In-memory response cache that shields the rewrite service from duplicate
//! work.
//!
//! ## Features
//!
//! - **Bounded**: fixed capacity with first-in-first-out eviction
//! - **Content-hashed keys**: fingerprints hash the full text, never a prefix
//! - **Thread-safe**: one lock per cache instance serializes mutation
//! - **Metrics**: hit, miss, insertion and eviction counters

pub mod cache;
pub mod fingerprint;
pub mod metrics;

pub use cache::{CacheConfig, ResponseCache, CLIENT_CAPACITY, SERVER_CAPACITY};
pub use fingerprint::fingerprint;
pub use metrics::{CacheMetrics, CacheStats};
