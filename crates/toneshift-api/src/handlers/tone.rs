//! Adjust-tone endpoint

use std::net::SocketAddr;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    Json,
};
use toneshift_http::{AdjustToneRequest, AdjustToneResponse, ErrorBody, RewriteError};
use tracing::debug;

use crate::{error::ApiResult, state::AppState};

/// Rewrite text to the requested tone
///
/// Requests are validated, then admitted per client address, then served
/// from the cache or the upstream model.
#[utoipa::path(
    post,
    path = "/api/adjust-tone",
    request_body = AdjustToneRequest,
    responses(
        (status = 200, description = "Text rewritten", body = AdjustToneResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 429, description = "Rate limit exceeded", body = ErrorBody),
        (status = 500, description = "Upstream failure", body = ErrorBody),
        (status = 503, description = "Upstream unreachable", body = ErrorBody)
    )
)]
pub async fn adjust_tone(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    payload: Result<Json<AdjustToneRequest>, JsonRejection>,
) -> ApiResult<Json<AdjustToneResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        RewriteError::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
    })?;
    let tone_level = request.validate()?;

    let identity = peer.ip().to_string();
    debug!(client = %identity, tone = %tone_level, "Adjust tone request");

    let rewrite = state
        .pipeline
        .process(&identity, &request.text, tone_level)
        .await?;

    Ok(Json(AdjustToneResponse {
        adjusted_text: rewrite.text,
    }))
}
