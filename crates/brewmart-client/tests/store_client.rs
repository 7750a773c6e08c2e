//! Integration tests for `StoreClient`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use brewmart_client::{ClientError, StoreApi, StoreClient};

/// 5-second timeout, descriptive UA, no retries.
fn test_client(base: &str) -> StoreClient {
    StoreClient::new(base, 5, "brewmart-test/0.1", 0, 0).expect("failed to build test StoreClient")
}

fn test_client_with_retries(base: &str, max_retries: u32) -> StoreClient {
    StoreClient::new(base, 5, "brewmart-test/0.1", max_retries, 0)
        .expect("failed to build test StoreClient")
}

fn product_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("products.bean_{id}"),
        "price": 10.0,
        "stock": null,
        "metadata": { "image": "QmImage", "origin": "Huila" }
    })
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_products_sends_limit_and_hidden_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("limit", "3"))
        .and(query_param("excludeHidden", "true"))
        .and(wiremock::matchers::query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [product_json(1), product_json(2), product_json(3)],
            "nextCursor": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client.list_products(3, true, None).await.unwrap();

    assert_eq!(page.products.len(), 3);
    assert_eq!(page.next_cursor.as_deref(), Some("page-2"));
    assert_eq!(page.products[0].id, "1");
    assert_eq!(page.products[0].stock, 0, "null stock should normalize to 0");
    assert!(!page.products[0].hidden);
}

#[tokio::test]
async fn list_products_passes_cursor_for_following_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("cursor", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [product_json(4)],
            "nextCursor": null
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client.list_products(3, true, Some("page-2")).await.unwrap();

    assert_eq!(page.products.len(), 1);
    assert!(!page.has_more(), "null nextCursor means last page");
}

#[tokio::test]
async fn list_products_falls_back_to_link_header_cursor() {
    let server = MockServer::start().await;
    let link = format!(
        "<{}/products?limit=3&cursor=from-link>; rel=\"next\"",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "products": [product_json(1)] }))
                .insert_header("Link", link.as_str()),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client.list_products(3, true, None).await.unwrap();
    assert_eq!(page.next_cursor.as_deref(), Some("from-link"));
}

#[tokio::test]
async fn list_products_tolerates_malformed_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{
                "id": "x-1",
                "name": "products.broken",
                "price": "7.50",
                "metadata": "{this is not json"
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client.list_products(3, true, None).await.unwrap();
    assert_eq!(page.products.len(), 1);
    assert!(page.products[0].metadata.is_none());
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rate_limit_is_reported_with_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    match client.list_products(3, true, None).await.unwrap_err() {
        ClientError::RateLimited {
            retry_after_secs, ..
        } => assert_eq!(retry_after_secs, 30),
        other => panic!("expected ClientError::RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_without_retry_after_defaults_to_60s() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    match client.list_products(3, true, None).await.unwrap_err() {
        ClientError::RateLimited {
            retry_after_secs, ..
        } => assert_eq!(retry_after_secs, 60),
        other => panic!("expected ClientError::RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn not_found_is_mapped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_products(3, true, None).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }), "got: {err:?}");
}

#[tokio::test]
async fn server_error_is_mapped_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_products(3, true, None).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn malformed_json_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_products(3, true, None).await.unwrap_err();
    assert!(matches!(err, ClientError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn listing_retries_after_429_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "products": [product_json(1)] })),
        )
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server.uri(), 1);
    let page = client.list_products(3, true, None).await.unwrap();
    assert_eq!(page.products.len(), 1);
}

// ---------------------------------------------------------------------------
// Search and cart
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_sends_query_and_normalizes_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/search"))
        .and(query_param("q", "ethiopia natural"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [product_json(9)]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client.search_products("ethiopia natural").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "9");
}

#[tokio::test]
async fn fetch_cart_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart"))
        .and(header("Authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "productId": "1", "quantity": 2 }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_api_token(Some("t0ken".to_owned()));
    let cart = client.fetch_cart().await.unwrap();
    assert_eq!(cart.item_count(), 2);
}

#[tokio::test]
async fn add_to_cart_posts_item_with_idempotency_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/items"))
        .and(header_exists("Idempotency-Key"))
        .and(body_json(json!({ "productId": "42", "quantity": 1 })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client.add_to_cart("42", 1).await.unwrap();
}

#[tokio::test]
async fn add_to_cart_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/items"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server.uri(), 3);
    let err = client.add_to_cart("42", 1).await.unwrap_err();
    assert!(
        matches!(err, ClientError::UnexpectedStatus { status: 503, .. }),
        "got: {err:?}"
    );
}
