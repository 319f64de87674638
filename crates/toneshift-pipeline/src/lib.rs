#![warn(missing_docs)]

//! Request shaping for ToneShift
//!
//! Tone changes are debounced, admitted by a per-client [`RequestGate`],
//! served from a shared [`toneshift_cache::ResponseCache`] when possible and
//! only then sent to a [`toneshift_http::RewriteService`]. A [`ToneSession`]
//! feeds the results into its undo/redo history.

pub mod debounce;
pub mod gate;
pub mod pipeline;
pub mod session;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use gate::{RateLimitConfig, RequestGate};
pub use pipeline::{PipelineConfig, PipelineOutcome, Resolution, Rewrite, RewritePipeline};
pub use session::{ToneSession, ADJUST_FAILED_MESSAGE};
