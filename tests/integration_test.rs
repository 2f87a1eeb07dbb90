//! Integration tests for the gateway router.
//!
//! These tests exercise routing, validation and the envelope shape without
//! reaching any upstream service.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{create_test_app, get_json, test_config, StubResolver};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tower::ServiceExt;

// Nothing listens here; validation must reject before any call is made.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn app() -> axum::Router {
    create_test_app(
        test_config(UNREACHABLE),
        Arc::new(StubResolver::resolving_to(Ipv4Addr::LOCALHOST)),
    )
}

#[tokio::test]
async fn test_index_endpoint() {
    let (status, json) = get_json(app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "active");
    assert_eq!(json["docs"], "Use /api/{endpoint}?param=value");
    assert!(json["message"].is_string());
    for route in [
        "/api/llama",
        "/api/deepseek",
        "/api/gpt-oss",
        "/api/search",
        "/api/image",
        "/api/domain",
    ] {
        assert!(json["endpoints"][route].is_string(), "missing {}", route);
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, json) = get_json(app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_missing_parameters_are_rejected() {
    let cases = [
        ("/api/llama", "message"),
        ("/api/deepseek", "message"),
        ("/api/gpt-oss", "message"),
        ("/api/search", "query"),
        ("/api/image", "prompt"),
        ("/api/domain", "domain"),
    ];

    for (route, param) in cases {
        let (status, json) = get_json(app(), route).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", route);
        assert_eq!(
            json,
            json!({ "error": format!("Missing '{}' parameter", param) }),
            "{}",
            route
        );
    }
}

#[tokio::test]
async fn test_empty_parameters_are_rejected() {
    let cases = [
        "/api/llama?message=",
        "/api/search?query=",
        "/api/image?prompt=",
        "/api/domain?domain=",
    ];

    for uri in cases {
        let (status, json) = get_json(app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(json["error"].is_string());
    }
}

#[tokio::test]
async fn test_wrong_parameter_name_is_rejected() {
    let (status, json) = get_json(app(), "/api/search?q=rust").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing 'query' parameter");
}

#[tokio::test]
async fn test_present_parameter_reaches_upstream() {
    // A non-empty value never short-circuits to 400; the unreachable upstream
    // turns it into a 500 instead.
    let (status, json) = get_json(app(), "/api/search?query=rust").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!json["error"].as_str().unwrap().is_empty());
    assert!(json.get("status").is_none());
}

#[tokio::test]
async fn test_missing_credential_is_server_error() {
    let mut config = test_config(UNREACHABLE);
    config.chat.provider.api_key = None;
    let app = create_test_app(
        config,
        Arc::new(StubResolver::resolving_to(Ipv4Addr::LOCALHOST)),
    );

    let (status, json) = get_json(app, "/api/deepseek?message=hi").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "OPENROUTER_API_KEY is not configured" }));
}

#[tokio::test]
async fn test_request_id_header() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .unwrap();
    assert_eq!(request_id.len(), 36);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    // Generate some traffic first so request counters exist.
    let _ = get_json(app(), "/health").await;

    let response = app()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("gateway_requests_total"));
}

#[tokio::test]
async fn test_metrics_label_matched_routes_only() {
    for i in 0..10 {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(format!("/no-such-route-{}", i))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
    let (status, _) = get_json(app(), "/api/search?query=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response = app()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert!(!text.contains("/no-such-route-"));
    assert!(text.contains(r#"endpoint="/api/search""#));
}

#[tokio::test]
async fn test_unknown_route() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_not_allowed() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/llama?message=hi")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
