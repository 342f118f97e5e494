use axum::http::StatusCode;
use serde_json::json;
use tower::util::ServiceExt;

use super::harness::{TestHarness, decode_json, json_request};

#[tokio::test]
async fn web_site_exposes_title_homepage_and_feature_flags() {
    let harness = TestHarness::setup();
    let response = harness.get("/api/site").await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload: serde_json::Value = decode_json(response).await;
    assert_eq!(payload["title"], "Folio");
    assert_eq!(payload["assistant_enabled"], false);
    assert!(payload["giscus"].is_null());
    assert!(
        payload["homepage"]["hero"]["title"]
            .as_str()
            .is_some_and(|x| !x.is_empty())
    );
    assert_eq!(
        payload["homepage"]["features"]
            .as_array()
            .expect("features")
            .len(),
        3
    );
}

#[tokio::test]
async fn web_index_and_assets_are_served_inline() {
    let harness = TestHarness::setup();

    let index = harness.get("/").await;
    assert_eq!(index.status(), StatusCode::OK);

    let css = harness.get("/assets/index.css").await;
    assert_eq!(
        css.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/css; charset=utf-8")
    );

    let js = harness.get("/assets/index.js").await;
    assert_eq!(
        js.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/javascript; charset=utf-8")
    );
}

#[tokio::test]
async fn web_assistant_ask_without_api_key_returns_503() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(json_request(
            "/api/assistant/ask",
            json!({
                "slug": "getting-started",
                "question": "How do I install it?"
            }),
        ))
        .await
        .expect("ask response");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let payload: serde_json::Value = decode_json(response).await;
    assert_eq!(payload["code"], "ASSISTANT_DISABLED");
    assert_eq!(payload["operation"], "assistant.ask");
}

#[tokio::test]
async fn web_assistant_ask_unknown_slug_returns_404() {
    let harness = TestHarness::setup();
    let response = harness
        .router
        .clone()
        .oneshot(json_request(
            "/api/assistant/ask",
            json!({
                "slug": "missing-doc",
                "question": "Anything?"
            }),
        ))
        .await
        .expect("ask response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let payload: serde_json::Value = decode_json(response).await;
    assert_eq!(payload["code"], "NOT_FOUND");
}
