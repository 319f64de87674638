//! HTTP server lifecycle

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::{config::ServerConfig, error::ApiResult, routes, state::AppState};

/// ToneShift HTTP server
///
/// The response cache and rate limiter live in [`AppState`] and are dropped
/// with the server.
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a server rewriting through the configured upstream
    pub fn new(config: ServerConfig) -> ApiResult<Self> {
        let state = AppState::new(&config)?;
        Ok(Self { config, state })
    }

    /// Create a server around prepared state
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Router serving every route
    pub fn router(&self) -> Router {
        routes::all_routes(self.state.clone(), &self.config.static_dir)
    }

    /// Shared state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Bind the configured address and serve until ctrl-c
    pub async fn run(self) -> ApiResult<()> {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        info!("Server running on {}", listener.local_addr()?);
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on `listener` until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> ApiResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
