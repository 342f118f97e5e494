use axum::{
    extract::Request,
    http::{
        HeaderMap, HeaderValue,
        header::{self, HeaderName},
    },
    middleware::Next,
    response::Response,
};

pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    apply_security_headers(response.headers_mut());
    response
}

// KaTeX and highlight.js load from jsdelivr; the comment widget embeds an
// iframe from giscus.app. Everything else stays same-origin.
fn apply_security_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("no-referrer"),
    );
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static("geolocation=(), microphone=(), camera=()"),
    );
    headers.insert(
        HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static(
            "default-src 'self'; connect-src 'self'; img-src 'self' http: https:; \
             style-src 'self' https://cdn.jsdelivr.net; \
             script-src 'self' https://cdn.jsdelivr.net https://giscus.app; \
             font-src 'self' https://cdn.jsdelivr.net; \
             frame-src https://giscus.app; \
             object-src 'none'; base-uri 'none'; frame-ancestors 'none'",
        ),
    );
}
