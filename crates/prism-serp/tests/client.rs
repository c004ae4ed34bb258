//! Integration tests for `SerpClient` using wiremock HTTP mocks.

use std::time::Duration;

use prism_serp::{normalize_response, SerpClient, SerpError, PROXY_RESULT_LIMIT};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> SerpClient {
    SerpClient::with_base_url("test-key", 5, "prism-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn two_results() -> serde_json::Value {
    json!({
        "search_metadata": { "status": "Success" },
        "shopping_results": [
            { "title": "iPhone 15 Pro", "price": "$999.00", "source": "Apple" },
            { "title": "iPhone 15 Pro Max", "price": "$1199.00", "source": "Best Buy" }
        ]
    })
}

#[tokio::test]
async fn search_sends_expected_parameters_and_returns_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("engine", "google_shopping"))
        .and(query_param("q", "iphone 15 pro"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("num", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_results()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let body = client
        .search_value("iphone 15 pro", PROXY_RESULT_LIMIT)
        .await
        .expect("search should succeed");

    assert_eq!(body, two_results());
    assert_eq!(normalize_response(&body).len(), 2);
}

#[tokio::test]
async fn search_returns_body_text_unaltered() {
    let server = MockServer::start().await;
    // Unsorted keys, a trailing-zero float and an integer beyond u64.
    let raw = r#"{"shopping_results":[{"title":"x","rating":4.90,"price":"$1.00"}],"search_metadata":{"id":12345678901234567890123}}"#;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(raw, "application/json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let body = client.search("x", 20).await.expect("search should succeed");
    assert_eq!(body, raw);
}

#[tokio::test]
async fn search_maps_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({ "error": "quota exceeded" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("iphone", 20).await.unwrap_err();
    assert!(
        matches!(err, SerpError::UpstreamStatus { status: 429, .. }),
        "expected UpstreamStatus(429), got: {err:?}"
    );
}

#[tokio::test]
async fn search_keeps_provider_error_message_on_rejected_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid API key." })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("iphone", 5).await.unwrap_err();
    match &err {
        SerpError::UpstreamStatus { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message.as_deref(), Some("Invalid API key."));
        }
        other => panic!("expected UpstreamStatus, got: {other:?}"),
    }
    assert!(err.describe().contains("Invalid API key."));
}

#[tokio::test]
async fn search_status_without_error_body_has_no_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("iphone", 20).await.unwrap_err();
    assert!(
        matches!(err, SerpError::UpstreamStatus { status: 503, message: None }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn search_reports_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("iphone", 20).await.unwrap_err();
    assert!(matches!(err, SerpError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn search_times_out_without_leaking_credential() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(two_results())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = SerpClient::with_base_url("test-key", 1, "prism-test/0.1", &server.uri())
        .expect("client");
    let err = client.search("iphone", 20).await.unwrap_err();

    assert!(matches!(err, SerpError::Http(_)), "got: {err:?}");
    let described = err.describe();
    assert!(!described.contains("test-key"), "leaked key: {described}");
}

#[tokio::test]
async fn search_reports_connection_failure() {
    // Nothing listens on port 9 on loopback.
    let client = test_client("http://127.0.0.1:9");
    let err = client.search("iphone", 20).await.unwrap_err();
    assert!(matches!(err, SerpError::Http(_)), "got: {err:?}");
}
