//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use pricebook_core::PricingEngine;

use crate::config::ServerConfig;
use crate::gateway::SqliteGateway;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to shared
/// resources like the database pool and the pricing engine.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: SqlitePool,
    gateway: SqliteGateway,
    engine: PricingEngine<SqliteGateway>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `pool` - SQLite connection pool
    #[must_use]
    pub fn new(config: ServerConfig, pool: SqlitePool) -> Self {
        let gateway = SqliteGateway::new(pool.clone());
        let engine = PricingEngine::new(gateway.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                gateway,
                engine,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the persistence gateway (cart storage).
    #[must_use]
    pub fn gateway(&self) -> &SqliteGateway {
        &self.inner.gateway
    }

    /// Get a reference to the pricing engine.
    #[must_use]
    pub fn engine(&self) -> &PricingEngine<SqliteGateway> {
        &self.inner.engine
    }
}
