//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Bind the listener
//! - Serve the finished route table until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::MuxConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::routing::Router;

/// Why the server could not start or stopped abnormally.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid address {0:?}")]
    Address(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Serve `router` on the configured address until Ctrl+C.
pub async fn run(config: MuxConfig, router: Router) -> Result<(), StartupError> {
    let shutdown = Shutdown::new();
    signals::shutdown_on_ctrl_c(shutdown.clone());
    serve(config, router, &shutdown).await
}

/// Serve `router` until `shutdown` fires.
pub async fn serve(config: MuxConfig, router: Router, shutdown: &Shutdown) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr = parse_addr(&config.observability.metrics_address)?;
        crate::observability::metrics::init_metrics(addr)?;
    }

    let addr = parse_addr(&config.listener.bind_address)?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    tracing::info!(
        address = %addr,
        request_timeout_secs = config.timeouts.request_secs,
        "Listening for connections"
    );

    let server = HttpServer::new(router, config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn parse_addr(addr: &str) -> Result<SocketAddr, StartupError> {
    addr.parse()
        .map_err(|_| StartupError::Address(addr.to_string()))
}
