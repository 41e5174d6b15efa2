mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use dialogue::FailurePolicy;
use extract::testing::ScriptedModel;
use std::sync::Arc;
use tower::util::ServiceExt;

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let app = common::router_with(Arc::new(ScriptedModel::new()), FailurePolicy::Abort);

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/generate-podcast")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let allow_origin = resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert_eq!(allow_origin, "*");
    let allow_methods = resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(allow_methods.contains("POST"));
}

#[tokio::test]
async fn bare_options_returns_no_content() {
    let app = common::router_with(Arc::new(ScriptedModel::new()), FailurePolicy::Abort);

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/generate-podcast")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn simple_get_includes_allow_origin() {
    let app = common::router_with(Arc::new(ScriptedModel::new()), FailurePolicy::Abort);

    let req = Request::builder()
        .uri("/api/test")
        .header(header::ORIGIN, "http://127.0.0.1:3000")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
