//! Rewrite service contract for ToneShift
//!
//! Everything that crosses the wire between the editor, the ToneShift server
//! and the upstream language model lives here.
//!
//! ## Features
//!
//! - **Trait-based design**: the pipeline talks to a mockable `RewriteService`
//! - **Error taxonomy**: every failure is classified as invalid input, rate
//!   limited, unavailable or unknown
//! - **Tone mapping**: deterministic tone level to style descriptor and prompt
//! - **Two clients**: `HttpRewriteClient` for the ToneShift API,
//!   `MistralRewriter` for the upstream model

pub mod client;
pub mod config;
pub mod error;
pub mod mistral;
pub mod models;
pub mod tone;

pub use client::{HttpRewriteClient, RewriteService};
pub use config::HttpConfig;
pub use error::{
    ErrorKind, Result, RewriteError, GATE_REJECTED_MESSAGE, UPSTREAM_RATE_LIMITED_MESSAGE,
};
pub use mistral::{MistralConfig, MistralRewriter};
pub use models::{AdjustToneRequest, AdjustToneResponse, ErrorBody};
pub use tone::{build_prompt, ToneStyle};

/// Re-export commonly used types
pub use reqwest::StatusCode;
