//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed cookie sessions using tower-sessions with
//! SameSite=Strict and a 24hr inactivity expiry. The [`SessionManager`]
//! stores its `admin_user`/`admin_token` pair in these sessions.
//!
//! [`SessionManager`]: crate::services::SessionManager

use sqlx::PgPool;
use thiserror::Error;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AdminConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "vitrine_admin_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

const SESSION_SCHEMA: &str = "public";
const SESSION_TABLE: &str = "admin_session";

/// The session store rejected a schema or table name.
#[derive(Debug, Error)]
#[error("invalid session store name: {0}")]
pub struct SessionStoreError(String);

/// Create the session layer with `PostgreSQL` store.
///
/// The table is created by the `create_settings_and_sessions` migration.
///
/// # Errors
///
/// Returns `SessionStoreError` if the schema or table name is rejected.
pub fn create_session_layer(
    pool: &PgPool,
    config: &AdminConfig,
) -> Result<SessionManagerLayer<PostgresStore>, SessionStoreError> {
    let store = PostgresStore::new(pool.clone())
        .with_schema_name(SESSION_SCHEMA)
        .map_err(SessionStoreError)?
        .with_table_name(SESSION_TABLE)
        .map_err(SessionStoreError)?;

    // Secure cookies only when served over HTTPS
    let is_secure = config.base_url.starts_with("https://");

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/"))
}
