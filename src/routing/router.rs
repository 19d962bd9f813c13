//! Route table and request dispatch.
//!
//! # Responsibilities
//! - Store compiled routes per HTTP method, in registration order
//! - Derive HEAD routes from GET registrations
//! - Redirect trailing-slash paths before any lookup
//! - Dispatch to the first matching route, or to the not-found handler
//!
//! # Design Decisions
//! - Registration takes `&mut self`; serving shares the router behind an
//!   `Arc`, so the table cannot change while requests are in flight
//! - First registered wins; duplicates are kept, never deduplicated
//! - O(n) scan over the method's routes (acceptable for typical route counts)
//! - Parameters travel in the request's extensions, never in shared state

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::http::response;
use crate::observability::metrics;
use crate::routing::error::RouteError;
use crate::routing::handler::{BoxHandler, Handler};
use crate::routing::matcher::Pattern;
use crate::routing::params::PathParams;

const DERIVED_FROM_GET: &[Method] = &[Method::HEAD];

/// Methods that receive a copy of every route registered under `method`.
pub fn derived_methods(method: &Method) -> &'static [Method] {
    if *method == Method::GET {
        DERIVED_FROM_GET
    } else {
        &[]
    }
}

/// Location for a trailing-slash redirect.
///
/// Leading slashes (and backslashes, which browsers read as slashes) collapse
/// to a single `/` so the target can never be a protocol-relative URL.
fn redirect_target(stripped: &str) -> String {
    format!("/{}", stripped.trim_start_matches(['/', '\\']))
}

/// A registered pattern and the handler it dispatches to.
pub struct Route {
    pattern: Pattern,
    handler: BoxHandler,
}

impl Route {
    /// The pattern as registered.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn has_named_params(&self) -> bool {
        self.pattern.has_named_params()
    }

    pub fn has_wildcard(&self) -> bool {
        self.pattern.has_wildcard()
    }

    /// Test a path against this route's pattern.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        self.pattern.matches(path)
    }

    /// Whether two routes dispatch to the very same handler instance.
    pub fn shares_handler_with(&self, other: &Route) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.as_str())
            .field("has_named_params", &self.has_named_params())
            .field("has_wildcard", &self.has_wildcard())
            .finish_non_exhaustive()
    }
}

/// What dispatch decided for a (method, path) pair.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// The path had a trailing slash; redirect to this location.
    Redirect(String),
    /// A route matched.
    Matched {
        route: &'a Route,
        params: PathParams,
    },
    /// Nothing matched for this method.
    NotFound,
}

impl Resolution<'_> {
    /// Metrics label for this outcome: `matched`, `redirect` or `not_found`.
    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::Redirect(_) => "redirect",
            Resolution::Matched { .. } => "matched",
            Resolution::NotFound => "not_found",
        }
    }
}

/// Method-indexed route table.
#[derive(Default)]
pub struct Router {
    routes: HashMap<Method, Vec<Route>>,
    not_found: Option<BoxHandler>,
}

impl Router {
    /// Create an empty router with the default not-found response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `pattern` under `method`, plus any derived
    /// methods (GET also registers HEAD).
    pub fn route<H: Handler>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError> {
        let pattern = Pattern::parse(pattern)?;
        let handler: BoxHandler = Arc::new(handler);

        for derived in derived_methods(&method) {
            self.push(derived.clone(), pattern.clone(), Arc::clone(&handler));
        }
        self.push(method, pattern, handler);

        Ok(self)
    }

    fn push(&mut self, method: Method, pattern: Pattern, handler: BoxHandler) {
        tracing::debug!(method = %method, pattern = %pattern, "Route registered");
        self.routes
            .entry(method)
            .or_default()
            .push(Route { pattern, handler });
    }

    /// Register a GET route. The same route also answers HEAD.
    pub fn get<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.route(Method::GET, pattern, handler)
    }

    pub fn head<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.route(Method::HEAD, pattern, handler)
    }

    pub fn post<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.route(Method::POST, pattern, handler)
    }

    pub fn put<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.route(Method::PUT, pattern, handler)
    }

    pub fn delete<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.route(Method::DELETE, pattern, handler)
    }

    pub fn options<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.route(Method::OPTIONS, pattern, handler)
    }

    pub fn patch<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.route(Method::PATCH, pattern, handler)
    }

    /// Handler invoked when no route matches. Its response is always sent
    /// with status 404.
    pub fn not_found<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.not_found = Some(Arc::new(handler));
        self
    }

    /// Routes registered under `method`, in match order.
    pub fn routes(&self, method: &Method) -> impl Iterator<Item = &Route> {
        self.routes.get(method).into_iter().flatten()
    }

    /// Number of methods with at least one route.
    pub fn method_count(&self) -> usize {
        self.routes.len()
    }

    /// Total number of routes across all methods, derived ones included.
    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Decide the outcome for `method` and `path` without invoking anything.
    pub fn resolve<'a>(&'a self, method: &Method, path: &str) -> Resolution<'a> {
        if path.len() > 1 && path.ends_with('/') {
            return Resolution::Redirect(redirect_target(&path[..path.len() - 1]));
        }

        for route in self.routes(method) {
            if let Some(params) = route.matches(path) {
                return Resolution::Matched { route, params };
            }
        }

        Resolution::NotFound
    }

    /// Dispatch one request to at most one handler.
    pub async fn serve(&self, mut req: Request<Body>) -> Response {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let resolution = self.resolve(&method, &path);
        let outcome = resolution.outcome();

        let res = match resolution {
            Resolution::Redirect(location) => {
                tracing::debug!(method = %method, path = %path, location = %location, "Redirecting trailing slash");
                response::moved_permanently(&location)
            }
            Resolution::Matched { route, params } => {
                tracing::debug!(
                    method = %method,
                    path = %path,
                    pattern = %route.pattern(),
                    params = params.len(),
                    "Route matched"
                );
                req.extensions_mut().insert(params);
                route.handler.call(req).await
            }
            Resolution::NotFound => {
                tracing::debug!(method = %method, path = %path, "No route matched");
                match &self.not_found {
                    Some(handler) => {
                        let mut res = handler.call(req).await;
                        *res.status_mut() = StatusCode::NOT_FOUND;
                        res
                    }
                    None => response::not_found(),
                }
            }
        };

        metrics::record_dispatch(method.as_str(), outcome, res.status().as_u16(), start);
        res
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("custom_not_found", &self.not_found.is_some())
            .finish()
    }
}
