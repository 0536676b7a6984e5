//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::db::PgStore;
use crate::services::SessionKey;

/// Error creating the session signing key.
#[derive(Debug, thiserror::Error)]
#[error("invalid session key: {0}")]
pub struct SessionKeyError(#[from] hmac::digest::InvalidLength);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the store, configuration and session key.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: PgStore,
    session_key: SessionKey,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the session secret cannot key the token signer.
    pub fn new(config: AdminConfig, pool: PgPool) -> Result<Self, SessionKeyError> {
        let session_key = SessionKey::new(&config.session_secret)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store: PgStore::new(pool),
                session_key,
            }),
        })
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the data store.
    #[must_use]
    pub fn store(&self) -> &PgStore {
        &self.inner.store
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        self.inner.store.pool()
    }

    /// Get a reference to the persisted session signer.
    #[must_use]
    pub fn session_key(&self) -> &SessionKey {
        &self.inner.session_key
    }
}
