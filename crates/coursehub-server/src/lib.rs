//! Coursehub API Server
//!
//! HTTP backend for the Coursehub course catalog. Admin actions pass through
//! a fixed pipeline: the bearer token is verified, the caller's role is
//! checked, and the privileged read or write is recorded in an append-only
//! audit log.
//!
//! # Features
//!
//! - `tracing` - Install a `tracing-subscriber` formatter in the binary

#![warn(clippy::all)]

pub mod audit;
pub mod config;
pub mod courses;
pub mod db;
pub mod error;
pub mod middleware;
pub mod profiles;
pub mod request;
pub mod routes;
pub mod state;
#[cfg(feature = "tracing")]
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::{create_router, RouterOptions};
pub use state::AppState;

use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Server builder for constructing and running the API server.
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a new server with the given configuration.
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let state = AppState::new(&config).await?;
        Ok(Self { config, state })
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        routes::create_router(self.state.clone(), &RouterOptions::from(&self.config))
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!(%addr, database = self.state.has_database(), "Server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }

    /// Get the server's socket address.
    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        self.config.server.socket_addr()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
