//! Admin authentication error types.

use thiserror::Error;

use super::storage::StorageError;
use crate::db::RepositoryError;

/// Errors that can occur during admin authentication operations.
///
/// Callers distinguish failures by variant; the display text is for logs.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No account has the given username.
    #[error("admin user not found")]
    UserNotFound,

    /// The password does not match the stored hash.
    #[error("invalid password")]
    InvalidPassword,

    /// The account lookup or update failed.
    #[error("query error: {0}")]
    Query(#[from] RepositoryError),

    /// The session could not be persisted.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    /// The operation needs a logged-in admin.
    #[error("not authenticated")]
    NotAuthenticated,

    /// New password and its confirmation differ.
    #[error("password confirmation does not match")]
    PasswordMismatch,

    /// New password fails the strength rules.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Whether this is a credential failure (unknown user or wrong password).
    #[must_use]
    pub const fn is_credential_failure(&self) -> bool {
        matches!(self, Self::UserNotFound | Self::InvalidPassword)
    }
}
