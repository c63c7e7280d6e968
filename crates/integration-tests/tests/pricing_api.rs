//! End-to-end tests for cart calculation and persistence.

use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::json;

use pricebook_core::SavedCart;
use pricebook_integration_tests::{TestApp, decimal_field};

async fn create_product(app: &TestApp, name: &str, base_price: &str) -> i64 {
    let (status, product) = app
        .post_json("/products", &json!({"name": name, "base_price": base_price}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    product["id"].as_i64().expect("product id")
}

async fn create_promotion(app: &TestApp, name: &str, value: &str, target: i64) -> i64 {
    let (status, promotion) = app
        .post_json(
            "/promotions",
            &json!({
                "name": name,
                "kind": "PERCENTAGE_DISCOUNT",
                "value": value,
                "target_product_id": target,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    promotion["id"].as_i64().expect("promotion id")
}

#[tokio::test]
async fn undiscounted_cart_totals_match_the_subtotal() {
    let app = TestApp::spawn().await;
    let widget = create_product(&app, "Widget", "10.00").await;

    let (status, cart) = app
        .post_json(
            "/cart/calculate",
            &json!({"items": [{"product_id": widget, "quantity": 3}]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let lines = cart["lines"].as_array().expect("lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["product_name"], "Widget");
    assert_eq!(decimal_field(&lines[0], "line_total"), dec!(30.00));
    assert_eq!(decimal_field(&cart, "subtotal"), dec!(30.00));
    assert_eq!(decimal_field(&cart, "total_discount"), dec!(0));
    assert_eq!(decimal_field(&cart, "final_total"), dec!(30.00));
}

#[tokio::test]
async fn percentage_discount_is_applied_per_unit() {
    let app = TestApp::spawn().await;
    let widget = create_product(&app, "Widget", "10.00").await;
    let promo = create_promotion(&app, "Spring sale", "20", widget).await;

    let (status, cart) = app
        .post_json(
            "/cart/calculate",
            &json!({"items": [{"product_id": widget, "quantity": 2}]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let line = &cart["lines"].as_array().expect("lines")[0];
    assert_eq!(decimal_field(line, "effective_unit_price"), dec!(8.00));
    assert_eq!(decimal_field(line, "discount_amount"), dec!(4.00));
    assert_eq!(line["applied_promotion_id"].as_i64(), Some(promo));
    assert_eq!(decimal_field(&cart, "subtotal"), dec!(20.00));
    assert_eq!(decimal_field(&cart, "total_discount"), dec!(4.00));
    assert_eq!(decimal_field(&cart, "final_total"), dec!(16.00));
}

#[tokio::test]
async fn missing_product_fails_the_whole_calculation() {
    let app = TestApp::spawn().await;
    let widget = create_product(&app, "Widget", "10.00").await;

    let (status, body) = app
        .post_json(
            "/cart/calculate",
            &json!({"items": [
                {"product_id": widget, "quantity": 1},
                {"product_id": 999, "quantity": 1},
            ]}),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    // The offending product ID must reach the caller; no partial cart does.
    assert!(body["error"].as_str().expect("error").contains("999"));
    assert!(body.get("lines").is_none());
}

#[tokio::test]
async fn first_returned_promotion_wins() {
    let app = TestApp::spawn().await;
    let widget = create_product(&app, "Widget", "10.00").await;
    let first = create_promotion(&app, "Small sale", "10", widget).await;
    let _second = create_promotion(&app, "Big sale", "50", widget).await;

    let (_, cart) = app
        .post_json(
            "/cart/calculate",
            &json!({"items": [{"product_id": widget, "quantity": 1}]}),
        )
        .await;

    let line = &cart["lines"].as_array().expect("lines")[0];
    assert_eq!(line["applied_promotion_id"].as_i64(), Some(first));
    assert_eq!(decimal_field(line, "effective_unit_price"), dec!(9.00));
}

#[tokio::test]
async fn empty_cart_is_priced_not_rejected() {
    let app = TestApp::spawn().await;

    let (status, cart) = app.post_json("/cart/calculate", &json!({"items": []})).await;

    assert_eq!(status, StatusCode::OK);
    assert!(cart["lines"].as_array().expect("lines").is_empty());
    assert_eq!(decimal_field(&cart, "subtotal"), dec!(0));
    assert_eq!(decimal_field(&cart, "total_discount"), dec!(0));
    assert_eq!(decimal_field(&cart, "final_total"), dec!(0));
}

#[tokio::test]
async fn zero_quantity_is_rejected() {
    let app = TestApp::spawn().await;
    let widget = create_product(&app, "Widget", "10.00").await;

    let (status, _) = app
        .post_json(
            "/cart/calculate",
            &json!({"items": [{"product_id": widget, "quantity": 0}]}),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn saved_cart_round_trips_exactly() {
    let app = TestApp::spawn().await;
    let widget = create_product(&app, "Widget", "10.00").await;
    let gadget = create_product(&app, "Gadget", "3.50").await;
    create_promotion(&app, "Spring sale", "20", widget).await;

    let (status, saved) = app
        .post_json(
            "/cart/save",
            &json!({"items": [
                {"product_id": widget, "quantity": 2},
                {"product_id": gadget, "quantity": 4},
            ]}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let saved: SavedCart = serde_json::from_value(saved).expect("saved cart");
    assert_eq!(saved.cart.subtotal, dec!(34.00));
    assert_eq!(saved.cart.total_discount, dec!(4.00));
    assert_eq!(saved.cart.final_total, dec!(30.00));

    let (status, loaded) = app.get_json(&format!("/cart/{}", saved.id)).await;
    assert_eq!(status, StatusCode::OK);
    let loaded: SavedCart = serde_json::from_value(loaded).expect("loaded cart");

    assert_eq!(loaded.id, saved.id);
    assert_eq!(loaded.cart, saved.cart);
}

#[tokio::test]
async fn calculation_is_repeatable() {
    let app = TestApp::spawn().await;
    let widget = create_product(&app, "Widget", "10.00").await;
    create_promotion(&app, "Spring sale", "20", widget).await;
    let body = json!({"items": [{"product_id": widget, "quantity": 5}]});

    let (_, first) = app.post_json("/cart/calculate", &body).await;
    let (_, second) = app.post_json("/cart/calculate", &body).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_saved_cart_is_404() {
    let app = TestApp::spawn().await;

    let (status, _) = app.get_json("/cart/42").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
