//! Search-flow tests against a wiremock stand-in for the search proxy.

use std::time::Duration;

use prism_client::{savings_badge, ProxyClient, SearchController, SearchState};
use prism_serp::mock_shopping_response;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn controller(base_url: &str) -> SearchController {
    let client = ProxyClient::new(base_url, 5, "prism-test/0.1").expect("proxy client");
    SearchController::new(client)
}

#[tokio::test]
async fn successful_search_renders_cards_with_badges() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "iphone 15 pro"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_shopping_response()))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller(&server.uri());
    let state = controller.search("iphone 15 pro").await;

    let SearchState::Results { products, .. } = state else {
        panic!("expected results, got {state:?}");
    };
    assert_eq!(products.len(), 2);
    // $999 vs $1099: 100 / 1099
    assert_eq!(savings_badge(&products[0]), "Save 9%");
    // $1199 vs synthesized $1318.90: 120 / 1318.9
    assert_eq!(savings_badge(&products[1]), "Save 9%");

    let model = controller.render().await;
    assert!(!model.is_searching);
    assert_eq!(model.products_to_display().len(), 2);
}

#[tokio::test]
async fn empty_results_enter_empty_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "shopping_results": [] })))
        .mount(&server)
        .await;

    let controller = controller(&server.uri());
    let state = controller.search("zzzz").await;
    assert_eq!(
        state,
        SearchState::Empty {
            query: "zzzz".to_string()
        }
    );
    assert!(controller.render().await.is_empty_result());
}

#[tokio::test]
async fn upstream_429_enters_errored_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({ "error": "Upstream API error" })),
        )
        .mount(&server)
        .await;

    let controller = controller(&server.uri());
    let state = controller.search("iphone").await;
    let SearchState::Errored { message, .. } = state else {
        panic!("expected errored, got {state:?}");
    };
    assert!(message.contains("Upstream API error"), "message: {message}");

    let model = controller.render().await;
    assert!(!model.is_empty_result());
    assert!(model.error.is_some());
}

#[tokio::test]
async fn unreachable_proxy_enters_errored_state() {
    let controller = controller("http://127.0.0.1:9");
    let state = controller.search("iphone").await;
    assert!(matches!(state, SearchState::Errored { .. }), "got {state:?}");
}

#[tokio::test]
async fn blank_query_never_reaches_proxy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_shopping_response()))
        .expect(0)
        .mount(&server)
        .await;

    let controller = controller(&server.uri());
    assert!(controller.submit("   ").await.is_none());
    assert_eq!(controller.snapshot().await, SearchState::Idle);
}

#[tokio::test]
async fn newer_search_supersedes_slow_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mock_shopping_response())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "shopping_results": [] })))
        .mount(&server)
        .await;

    let controller = controller(&server.uri());
    let slow = controller.submit("slow").await.expect("slow handle");
    assert!(controller.snapshot().await.is_searching());

    let fast = controller.submit("fast").await.expect("fast handle");
    fast.await.expect("fast search completes");

    let aborted = slow.await;
    assert!(aborted.is_err_and(|e| e.is_cancelled()));

    assert_eq!(
        controller.snapshot().await,
        SearchState::Empty {
            query: "fast".to_string()
        }
    );
}
