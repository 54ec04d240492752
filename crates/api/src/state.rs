//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::mongo::MongoMirror;
use crate::services::chat::ChatHub;
use crate::stripe::StripeClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    stripe: StripeClient,
    mirror: Option<MongoMirror>,
    chat: ChatHub,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The mirror is optional; when absent the API serves everything from
    /// Postgres and the sync job is never started.
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool, mirror: Option<MongoMirror>) -> Self {
        let stripe = StripeClient::new(
            config.stripe.secret_key.clone(),
            config.stripe.webhook_secret.clone(),
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                stripe,
                mirror,
                chat: ChatHub::new(),
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Stripe client.
    #[must_use]
    pub fn stripe(&self) -> &StripeClient {
        &self.inner.stripe
    }

    /// Get a reference to the MongoDB mirror, if configured.
    #[must_use]
    pub fn mirror(&self) -> Option<&MongoMirror> {
        self.inner.mirror.as_ref()
    }

    /// Get a reference to the chat hub.
    #[must_use]
    pub fn chat(&self) -> &ChatHub {
        &self.inner.chat
    }
}
