//! Integration tests for the product and promotion endpoints.

use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::json;

use pricebook_integration_tests::{TestApp, decimal_field};

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_returns_ok() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok".to_vec());
}

#[tokio::test]
async fn readiness_pings_the_database() {
    let app = TestApp::spawn().await;

    let (status, _) = app.get("/health/ready").await;

    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn create_product_assigns_an_id() {
    let app = TestApp::spawn().await;

    let (status, product) = app
        .post_json("/products", &json!({"name": "Widget", "base_price": "10.00"}))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(product["id"].as_i64().is_some());
    assert_eq!(product["name"], "Widget");
    assert_eq!(decimal_field(&product, "base_price"), dec!(10.00));
}

#[tokio::test]
async fn created_product_can_be_fetched_by_id() {
    let app = TestApp::spawn().await;
    let (_, created) = app
        .post_json("/products", &json!({"name": "Widget", "base_price": "10.00"}))
        .await;
    let id = created["id"].as_i64().expect("id");

    let (status, fetched) = app.get_json(&format!("/products/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn products_list_in_creation_order() {
    let app = TestApp::spawn().await;
    app.post_json("/products", &json!({"name": "Widget", "base_price": "10.00"}))
        .await;
    app.post_json("/products", &json!({"name": "Gadget", "base_price": "3.50"}))
        .await;

    let (status, products) = app.get_json("/products").await;

    assert_eq!(status, StatusCode::OK);
    let products = products.as_array().expect("array");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["name"], "Widget");
    assert_eq!(products[1]["name"], "Gadget");
}

#[tokio::test]
async fn missing_product_is_404() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get_json("/products/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn product_with_empty_name_is_rejected() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post_json("/products", &json!({"name": "   ", "base_price": "10.00"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error").contains("name"));
}

#[tokio::test]
async fn product_with_negative_price_is_rejected() {
    let app = TestApp::spawn().await;

    let (status, _) = app
        .post_json("/products", &json!({"name": "Widget", "base_price": "-1.00"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Promotions
// =============================================================================

#[tokio::test]
async fn create_promotion_round_trips_through_the_list() {
    let app = TestApp::spawn().await;
    let (_, product) = app
        .post_json("/products", &json!({"name": "Widget", "base_price": "10.00"}))
        .await;

    let (status, promotion) = app
        .post_json(
            "/promotions",
            &json!({
                "name": "Spring sale",
                "kind": "PERCENTAGE_DISCOUNT",
                "value": "20",
                "target_product_id": product["id"],
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(promotion["kind"], "PERCENTAGE_DISCOUNT");
    assert_eq!(decimal_field(&promotion, "value"), dec!(20));

    let (_, promotions) = app.get_json("/promotions").await;
    assert_eq!(promotions.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn unknown_promotion_kind_is_rejected() {
    let app = TestApp::spawn().await;

    // The kind enumeration is closed; deserialization itself refuses it.
    let (status, _) = app
        .post_json(
            "/promotions",
            &json!({
                "name": "Mystery deal",
                "kind": "BUY_N_GET_M",
                "value": "1",
                "target_product_id": 1,
            }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn out_of_range_percentage_is_rejected() {
    let app = TestApp::spawn().await;

    for value in ["-5", "150"] {
        let (status, _) = app
            .post_json(
                "/promotions",
                &json!({
                    "name": "Bad deal",
                    "kind": "PERCENTAGE_DISCOUNT",
                    "value": value,
                    "target_product_id": 1,
                }),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
