//! ToneShift API server entry point

use anyhow::Result;
use toneshift_api::{ApiServer, ConfigLoader};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let config = ConfigLoader::new().load_with_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    tracing::info!("Starting ToneShift API...");

    let server = ApiServer::new(config)?;
    match server.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Server error: {}", e);
            Err(e.into())
        }
    }
}
