//! route-mux demo server.
//!
//! Registers a handful of routes exercising literal, named and wildcard
//! segments, then serves them until Ctrl+C.
//!
//! ```text
//! GET  /                         → index
//! GET  /hello/:name              → greeting
//! GET  /users/:id/posts/:post    → JSON echo of both parameters
//! GET  /static/*                 → wildcard tail
//! POST /echo                     → request body echoed back
//! *    anything else             → custom 404
//! ```

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use clap::Parser;
use std::path::PathBuf;

use route_mux::config::{load_config, MuxConfig};
use route_mux::lifecycle;
use route_mux::observability::logging::init_logging;
use route_mux::{RequestParamsExt, RouteError, Router};

const MAX_ECHO_BYTES: usize = 64 * 1024;

#[derive(Parser)]
#[command(name = "route-mux")]
#[command(about = "Demo server for the route-mux router", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MuxConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "route-mux starting");

    let router = demo_routes()?;
    lifecycle::run(config, router).await?;

    Ok(())
}

fn demo_routes() -> Result<Router, RouteError> {
    let mut router = Router::new();
    router
        .get("/", index)?
        .get("/hello/:name", hello)?
        .get("/users/:id/posts/:post", user_post)?
        .get("/static/*", static_asset)?
        .post("/echo", echo)?
        .not_found(missing);
    Ok(router)
}

async fn index(_req: Request<Body>) -> &'static str {
    "route-mux\n"
}

async fn hello(req: Request<Body>) -> String {
    format!("Hello, {}!\n", req.param("name").unwrap_or("stranger"))
}

async fn user_post(req: Request<Body>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "user": req.param("id"),
        "post": req.param("post"),
    }))
}

async fn static_asset(req: Request<Body>) -> String {
    format!("static asset: {}\n", req.wildcard().unwrap_or_default())
}

async fn echo(req: Request<Body>) -> Response {
    match axum::body::to_bytes(req.into_body(), MAX_ECHO_BYTES).await {
        Ok(bytes) => bytes.into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

async fn missing(req: Request<Body>) -> String {
    format!("no route for {} {}\n", req.method(), req.uri().path())
}
