//! Security headers must be present on every kind of response.

use axum::http::{
    header::{CONTENT_SECURITY_POLICY, STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS},
    StatusCode,
};
use edge_server::config::Environment;
use edge_server::http::X_REQUEST_ID;

mod common;

use common::StaticRoot;

const HSTS: &str = "max-age=31536000; includeSubDomains";

#[tokio::test]
async fn test_every_route_gets_nosniff_and_hsts_in_production() {
    let root = StaticRoot::new().with_file("index.html", "<h1>hi</h1>");
    let router = common::router(Environment::production(), root.path());

    let responses = vec![
        common::get(router.clone(), "/").await,
        common::get(router.clone(), "/missing.js").await,
        common::get(router.clone(), "/validate-ip-address?ip-address=1.1.1.1").await,
        common::post(router.clone(), "/csp-report", "{}").await,
    ];

    for response in responses {
        assert_eq!(response.headers[X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(response.headers[STRICT_TRANSPORT_SECURITY], HSTS);
        assert!(response.headers.contains_key(CONTENT_SECURITY_POLICY));
        assert!(response.headers.contains_key(X_REQUEST_ID));
    }
}

#[tokio::test]
async fn test_development_omits_hsts() {
    let root = StaticRoot::new().with_file("index.html", "<h1>hi</h1>");
    let router = common::router(Environment::development(), root.path());

    for uri in ["/", "/missing.js", "/validate-ip-address"] {
        let response = common::get(router.clone(), uri).await;
        assert!(!response.headers.contains_key(STRICT_TRANSPORT_SECURITY), "{uri}");
        assert_eq!(response.headers[X_CONTENT_TYPE_OPTIONS], "nosniff");
    }
}

#[tokio::test]
async fn test_any_non_development_name_gets_hsts() {
    let root = StaticRoot::new();
    let router = common::router(Environment::new("staging"), root.path());

    let response = common::get(router, "/validate-ip-address").await;
    assert_eq!(response.headers[STRICT_TRANSPORT_SECURITY], HSTS);
}

#[tokio::test]
async fn test_policy_is_identical_across_requests() {
    let root = StaticRoot::new().with_file("app.js", "console.log(1)");
    let router = common::router(Environment::production(), root.path());

    let first = common::get(router.clone(), "/app.js").await;
    let second = common::get(router.clone(), "/nope").await;
    let third = common::post(router, "/csp-report", "garbage").await;

    let policy = first.headers[CONTENT_SECURITY_POLICY].clone();
    assert_eq!(second.headers[CONTENT_SECURITY_POLICY], policy);
    assert_eq!(third.headers[CONTENT_SECURITY_POLICY], policy);
    assert_eq!(
        policy,
        "report-uri /csp-report; default-src 'self'; \
         connect-src 'self' https://jsonplaceholder.typicode.com ws:; \
         script-src-elem 'self'; style-src-elem 'self' 'unsafe-inline'"
    );
}

#[tokio::test]
async fn test_client_request_id_is_propagated() {
    let root = StaticRoot::new();
    let router = common::router(Environment::production(), root.path());

    let response = common::send(
        router,
        axum::http::Request::builder()
            .uri("/validate-ip-address")
            .header("x-request-id", "abc-123")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[X_REQUEST_ID], "abc-123");
}

#[tokio::test]
async fn test_request_span_carries_request_id() {
    let logs = common::CapturedLogs::default();
    let _guard = logs.install();

    let root = StaticRoot::new();
    let router = common::router(Environment::production(), root.path());
    common::send(
        router,
        axum::http::Request::builder()
            .uri("/validate-ip-address?ip-address=1.2.3.4")
            .header("x-request-id", "abc-123")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await;

    let logs = logs.contents();
    let line = logs
        .lines()
        .find(|line| line.contains("Applying security headers"))
        .unwrap_or_else(|| panic!("no middleware event in:\n{logs}"));
    assert!(line.contains("request{"), "{line}");
    assert!(line.contains("request_id=abc-123"), "{line}");
}
