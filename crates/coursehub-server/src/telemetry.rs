//! Tracing subscriber setup for the server binary.

use crate::config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `logging.level` when set. Fails if a subscriber is
/// already installed.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    let registry = tracing_subscriber::registry().with(filter);

    match config.format.to_lowercase().as_str() {
        "json" => registry
            .with(fmt::layer().json().with_current_span(true).with_target(true))
            .try_init()?,
        "compact" => registry.with(fmt::layer().compact()).try_init()?,
        _ => registry
            .with(fmt::layer().with_ansi(true).with_target(true))
            .try_init()?,
    }

    Ok(())
}
