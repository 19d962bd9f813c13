//! The handler abstraction the router dispatches to.

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures_util::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;

/// Anything that can answer a request.
///
/// Implemented for every `Fn(Request<Body>) -> impl Future` whose output
/// converts into a response, so plain `async fn`s and closures work.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoResponse,
{
    fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        self(req).map(IntoResponse::into_response).boxed()
    }
}

/// Shared handler reference. GET and its derived HEAD route hold the same one.
pub type BoxHandler = Arc<dyn Handler>;
