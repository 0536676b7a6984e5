//! Admin user domain type.

use chrono::{DateTime, Utc};

use vitrine_core::{AdminUserId, Email, Permissions};

/// An operator account, seeded out-of-band (see `vitrine-cli admin create`).
///
/// `Debug` is implemented by hand so the password hash never reaches logs.
#[derive(Clone)]
pub struct AdminUser {
    /// Unique admin user ID.
    pub id: AdminUserId,
    /// Login name.
    pub username: String,
    /// Contact address.
    pub email: Email,
    /// Permissions stored on the account, if any were set.
    pub permissions: Option<Permissions>,
    /// Argon2 PHC hash string.
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Last successful login, if any.
    pub last_login: Option<DateTime<Utc>>,
}

impl AdminUser {
    /// Permissions to grant a session for this account.
    ///
    /// Falls back to [`Permissions::default_set`] only when no permissions
    /// were stored. A stored empty set stays empty.
    #[must_use]
    pub fn effective_permissions(&self) -> Permissions {
        self.permissions
            .clone()
            .unwrap_or_else(Permissions::default_set)
    }
}

/// An account to insert.
#[derive(Clone)]
pub struct NewAdminUser {
    pub username: String,
    pub email: Email,
    /// `None` stores no permissions, so sessions get the default set.
    /// `Some` of an empty set grants nothing.
    pub permissions: Option<Permissions>,
    /// Argon2 PHC hash string, never the plain password.
    pub password_hash: String,
}

impl std::fmt::Debug for NewAdminUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAdminUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("permissions", &self.permissions)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for AdminUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("permissions", &self.permissions)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .field("last_login", &self.last_login)
            .finish()
    }
}
