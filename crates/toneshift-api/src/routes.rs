//! API route definitions

use std::path::Path;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    handlers::{health, tone},
    middleware::logging::logging_middleware,
    state::AppState,
};

/// API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/adjust-tone", post(tone::adjust_tone))
}

/// Swagger UI routes
pub fn swagger_routes() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Combined routes, with the client build served for every other path
pub fn all_routes(state: AppState, static_dir: &Path) -> Router {
    let client = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    api_routes()
        .merge(swagger_routes())
        .fallback_service(client)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(logging_middleware)),
        )
        .with_state(state)
}

/// OpenAPI document
#[derive(OpenApi)]
#[openapi(
    paths(health::health_check, tone::adjust_tone),
    components(schemas(
        toneshift_http::AdjustToneRequest,
        toneshift_http::AdjustToneResponse,
        toneshift_http::ErrorBody,
        crate::models::HealthResponse,
    )),
    info(
        title = "ToneShift API",
        version = "1.0.0",
        description = "Rewrite text to a target tone between formal and casual"
    )
)]
pub struct ApiDoc;
