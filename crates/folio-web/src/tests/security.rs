use axum::http::StatusCode;

use super::harness::{TestHarness, header_value};

#[tokio::test]
async fn web_responses_carry_security_headers() {
    let harness = TestHarness::setup();
    let response = harness.get("/api/docs").await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(header_value(headers, "x-content-type-options"), Some("nosniff"));
    assert_eq!(header_value(headers, "x-frame-options"), Some("DENY"));
    assert_eq!(header_value(headers, "referrer-policy"), Some("no-referrer"));
    assert!(header_value(headers, "permissions-policy").is_some());
}

#[tokio::test]
async fn web_csp_allows_cdn_and_comment_widget_only() {
    let harness = TestHarness::setup();
    let response = harness.get("/").await;
    let csp = header_value(response.headers(), "content-security-policy").expect("csp header");

    assert!(csp.contains("default-src 'self'"));
    assert!(csp.contains("https://cdn.jsdelivr.net"));
    assert!(csp.contains("frame-src https://giscus.app"));
    assert!(csp.contains("object-src 'none'"));
}

#[tokio::test]
async fn web_error_responses_also_carry_security_headers() {
    let harness = TestHarness::setup();
    let response = harness.get("/api/docs/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        header_value(response.headers(), "x-content-type-options"),
        Some("nosniff")
    );
}
