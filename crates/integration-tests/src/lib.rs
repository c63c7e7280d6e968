//! Integration test support for Pricebook.
//!
//! Drives the full axum router in-process over an in-memory SQLite database,
//! so the tests exercise routing, extraction, repositories, and the pricing
//! engine together without binding a socket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pricebook-integration-tests
//! ```

use std::net::{IpAddr, Ipv4Addr};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use pricebook_server::config::ServerConfig;
use pricebook_server::state::AppState;
use pricebook_server::{db, routes};

/// An in-process instance of the pricing API.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Build the API over a fresh in-memory database.
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be created or migrated.
    pub async fn spawn() -> Self {
        // A single connection keeps every query on the same in-memory
        // database for the lifetime of the test.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations");

        let config = ServerConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let state = AppState::new(config, pool);
        Self {
            router: routes::router(state),
        }
    }

    /// Send a GET request and return the status and raw body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or executed.
    pub async fn get(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("failed to build request");
        self.send(request).await
    }

    /// Send a GET request and parse the body as JSON.
    pub async fn get_json(&self, path: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(path).await;
        (status, into_json(&body))
    }

    /// Send a POST request with a JSON body and parse the response as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or executed.
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("failed to build request");
        let (status, bytes) = self.send(request).await;
        (status, into_json(&bytes))
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        (status, bytes.to_vec())
    }
}

/// Parse a response body as JSON.
///
/// Rejection responses from the framework (e.g. a refused enum value) carry
/// plain-text bodies; those come back as a JSON string so tests can still
/// assert on the status code.
fn into_json(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| {
        serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
    })
}

/// Read a decimal field from a JSON object, accepting either the string or
/// the numeric wire form.
///
/// # Panics
///
/// Panics if the field is missing or not a decimal.
#[must_use]
pub fn decimal_field(value: &serde_json::Value, key: &str) -> Decimal {
    let field = value
        .get(key)
        .unwrap_or_else(|| panic!("missing field {key}: {value}"));
    match field {
        serde_json::Value::String(s) => s.parse().expect("field was not a decimal"),
        other => other
            .to_string()
            .parse()
            .expect("field was not a decimal"),
    }
}
