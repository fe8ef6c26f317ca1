//! Coursehub Server Binary

use anyhow::{bail, Result};
use coursehub_server::config::{load_config, validate_config};
use coursehub_server::Server;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = load_config()?;

    #[cfg(feature = "tracing")]
    coursehub_server::telemetry::init(&config.logging)?;

    if let Err(errors) = validate_config(&config) {
        for err in &errors {
            tracing::error!(error = %err, "Invalid configuration");
        }
        bail!("{} configuration error(s)", errors.len());
    }

    info!("Starting Coursehub Server v{}", env!("CARGO_PKG_VERSION"));

    let server = Server::new(config).await?;
    server.run().await?;

    info!("Server shutdown complete");
    Ok(())
}
