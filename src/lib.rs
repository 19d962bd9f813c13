//! Method + path request router with named and wildcard segments.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::MuxConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Handler, PathParams, RequestParamsExt, RouteError, Router};
