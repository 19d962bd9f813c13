//! End-to-end dispatch over a real socket.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use route_mux::{RequestParamsExt, Router};

mod common;

fn counting(counter: &Arc<AtomicUsize>, body: &'static str) -> impl Fn(Request<Body>) -> std::future::Ready<&'static str> + Send + Sync + 'static {
    let counter = counter.clone();
    move |_req| {
        counter.fetch_add(1, Ordering::SeqCst);
        std::future::ready(body)
    }
}

#[tokio::test]
async fn test_named_params_reach_handler() {
    let mut router = Router::new();
    router
        .get("/foo/:bar/:baz", |req: Request<Body>| async move {
            format!(
                "bar={} baz={}",
                req.param("bar").unwrap_or_default(),
                req.param("baz").unwrap_or_default()
            )
        })
        .unwrap();
    let server = common::start_server(router).await;

    let res = common::client().get(server.url("/foo/xyz/123")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "bar=xyz baz=123");

    let res = common::client().get(server.url("/foo/xyz/123/extra")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_trailing_slash_redirects_for_every_method() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut router = Router::new();
    router.get("/docs", counting(&calls, "docs")).unwrap();
    router.post("/*", counting(&calls, "any")).unwrap();
    let server = common::start_server(router).await;
    let client = common::client();

    let res = client.get(server.url("/docs/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()["location"], "/docs");

    let res = client.post(server.url("/a/b/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()["location"], "/a/b");

    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let res = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_head_mirrors_get() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut router = Router::new();
    router.get("/items/:id", counting(&calls, "item")).unwrap();
    let server = common::start_server(router).await;
    let client = common::client();

    let res = client.head(server.url("/items/9")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let res = client.get(server.url("/items/9")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "item");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_first_registration_wins() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let mut router = Router::new();
    router.get("/same", counting(&first, "first")).unwrap();
    router.get("/same", counting(&second, "second")).unwrap();
    let server = common::start_server(router).await;

    for _ in 0..3 {
        let res = common::client().get(server.url("/same")).send().await.unwrap();
        assert_eq!(res.text().await.unwrap(), "first");
    }
    assert_eq!(first.load(Ordering::SeqCst), 3);
    assert_eq!(second.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_catch_all_after_specific_routes() {
    let mut router = Router::new();
    router
        .get("/api/health", |_req: Request<Body>| async { "healthy" })
        .unwrap()
        .get("/*", |req: Request<Body>| async move {
            format!("fallback:{}", req.wildcard().unwrap_or_default())
        })
        .unwrap();
    let server = common::start_server(router).await;
    let client = common::client();

    let res = client.get(server.url("/api/health")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "healthy");

    let res = client.get(server.url("/some/page")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "fallback:some/page");
}

#[tokio::test]
async fn test_default_not_found() {
    let mut router = Router::new();
    router.post("/only-post", |_req: Request<Body>| async { "posted" }).unwrap();
    let server = common::start_server(router).await;

    let res = common::client().get(server.url("/only-post")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "404 page not found\n");
}

#[tokio::test]
async fn test_custom_not_found() {
    let mut router = Router::new();
    router.not_found(|req: Request<Body>| async move {
        (StatusCode::IM_A_TEAPOT, format!("missing {}", req.uri().path()))
    });
    let server = common::start_server(router).await;

    let res = common::client().delete(server.url("/gone")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "missing /gone");
}

#[tokio::test]
async fn test_request_id_header_on_every_response() {
    let server = common::start_server(Router::new()).await;
    let res = common::client().get(server.url("/nothing")).send().await.unwrap();
    let id = res.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}
