//! Data store for the Vitrine dashboard.
//!
//! # Tables
//!
//! - `admin_users` - Operator accounts (Argon2 password hashes)
//! - `site_visits` - Append-only page view log
//! - `whatsapp_messages` - Contact submissions and their triage status
//! - `settings` - One JSONB document per settings section
//! - `admin_session` - tower-sessions storage
//!
//! # Store traits
//!
//! Services are generic over the store traits below so they can run against
//! [`PgStore`] in production and an in-memory store in tests. Every method is
//! a single round trip; there is no caching or retry at this layer.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p vitrine-cli -- migrate
//! ```

pub mod admin_users;
pub mod messages;
pub mod settings;
pub mod site_visits;

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use vitrine_core::{AdminUserId, MessageId, MessageStatus};

use crate::models::admin_user::NewAdminUser;
use crate::models::{AdminUser, NewSiteVisit, NewWhatsAppMessage, SiteVisit, WhatsAppMessage};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Operator account lookups and updates.
pub trait AdminUserStore: Send + Sync {
    /// Find the single account with this username.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<AdminUser>, RepositoryError>> + Send;

    /// Find an account by ID.
    fn find_by_id(
        &self,
        id: AdminUserId,
    ) -> impl Future<Output = Result<Option<AdminUser>, RepositoryError>> + Send;

    /// Record a successful login.
    fn touch_last_login(
        &self,
        id: AdminUserId,
        at: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Replace the stored password hash.
    fn update_password_hash(
        &self,
        id: AdminUserId,
        password_hash: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert a new account. Fails with `Conflict` on a duplicate username.
    fn create(
        &self,
        user: &NewAdminUser,
    ) -> impl Future<Output = Result<AdminUser, RepositoryError>> + Send;
}

/// Page view log.
pub trait VisitStore: Send + Sync {
    /// Total number of recorded visits.
    fn count_visits(&self) -> impl Future<Output = Result<u64, RepositoryError>> + Send;

    /// Visits with `start <= created_at <= end`.
    fn count_visits_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<u64, RepositoryError>> + Send;

    /// Timestamps of visits at or after `since`, ascending.
    fn visit_timestamps_since(
        &self,
        since: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<DateTime<Utc>>, RepositoryError>> + Send;

    /// Most recent visits first, at most `limit` rows.
    fn recent_visits(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<SiteVisit>, RepositoryError>> + Send;

    /// Append a visit stamped at `at`.
    fn insert_visit(
        &self,
        visit: &NewSiteVisit,
        at: DateTime<Utc>,
    ) -> impl Future<Output = Result<SiteVisit, RepositoryError>> + Send;
}

/// Contact message log.
pub trait MessageStore: Send + Sync {
    /// Total number of messages.
    fn count_messages(&self) -> impl Future<Output = Result<u64, RepositoryError>> + Send;

    /// Messages currently in `status`.
    fn count_messages_with_status(
        &self,
        status: MessageStatus,
    ) -> impl Future<Output = Result<u64, RepositoryError>> + Send;

    /// The status of every message, sorted by status label.
    fn message_statuses(
        &self,
    ) -> impl Future<Output = Result<Vec<MessageStatus>, RepositoryError>> + Send;

    /// All messages, newest first.
    fn list_messages(
        &self,
    ) -> impl Future<Output = Result<Vec<WhatsAppMessage>, RepositoryError>> + Send;

    /// Set a message's status and `updated_at`. Fails with `NotFound` if no row matches.
    fn update_message_status(
        &self,
        id: MessageId,
        status: MessageStatus,
        at: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert a message with both timestamps set to `at`.
    fn insert_message(
        &self,
        message: &NewWhatsAppMessage,
        at: DateTime<Utc>,
    ) -> impl Future<Output = Result<WhatsAppMessage, RepositoryError>> + Send;
}

/// JSON documents keyed by name.
pub trait SettingsStore: Send + Sync {
    /// Fetch a document, if stored.
    fn get_setting(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, RepositoryError>> + Send;

    /// Insert or replace a document.
    fn put_setting(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// `PostgreSQL`-backed implementation of every store trait.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Convert a `COUNT(*)` result, which Postgres returns as `BIGINT`.
fn count_to_u64(count: i64) -> Result<u64, RepositoryError> {
    u64::try_from(count)
        .map_err(|_| RepositoryError::DataCorruption(format!("negative row count: {count}")))
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_to_u64() {
        assert_eq!(count_to_u64(0).ok(), Some(0));
        assert_eq!(count_to_u64(42).ok(), Some(42));
        assert!(matches!(
            count_to_u64(-1),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
