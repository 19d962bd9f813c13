//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap the route table in an axum service
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Dispatch every request to the route table
//! - Graceful shutdown on the lifecycle broadcast

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router as AxumRouter,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::MuxConfig;
use crate::http::request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
use crate::routing::Router as MuxRouter;

/// HTTP front end for a finished route table.
pub struct HttpServer {
    app: AxumRouter,
    config: MuxConfig,
    route_count: usize,
}

impl HttpServer {
    /// Freeze `router` and build the service around it.
    pub fn new(router: MuxRouter, config: MuxConfig) -> Self {
        let route_count = router.len();
        let app = Self::build_app(&config, Arc::new(router));
        Self {
            app,
            config,
            route_count,
        }
    }

    /// Build the axum service with all middleware layers.
    ///
    /// Every path goes to the fallback; the route table does its own
    /// matching.
    #[allow(deprecated)]
    fn build_app(config: &MuxConfig, router: Arc<MuxRouter>) -> AxumRouter {
        AxumRouter::new()
            .fallback(dispatch)
            .with_state(router)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = %req.request_id().unwrap_or("unknown"),
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// The service, for driving requests in-process.
    pub fn app(&self) -> AxumRouter {
        self.app.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.route_count,
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &MuxConfig {
        &self.config
    }
}

async fn dispatch(State(router): State<Arc<MuxRouter>>, request: Request<Body>) -> Response {
    router.serve(request).await
}
