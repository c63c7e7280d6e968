//! HTTP route handlers for the pricing API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health            - Liveness check
//! GET  /health/ready      - Readiness check (database ping)
//!
//! # Products
//! POST /products          - Create a product
//! GET  /products          - List products
//! GET  /products/{id}     - Product detail
//!
//! # Promotions
//! POST /promotions        - Create a promotion
//! GET  /promotions        - List promotions
//!
//! # Carts
//! POST /cart/calculate    - Price a cart without persisting it
//! POST /cart/save         - Price a cart and persist the result
//! GET  /cart/{id}         - Fetch a previously saved cart
//! ```

pub mod carts;
pub mod products;
pub mod promotions;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware;
use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/products", post(products::create).get(products::list))
        .route("/products/{id}", get(products::show))
        .route("/promotions", post(promotions::create).get(promotions::list))
        .route("/cart/calculate", post(carts::calculate))
        .route("/cart/save", post(carts::save))
        .route("/cart/{id}", get(carts::show))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
