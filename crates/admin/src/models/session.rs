//! Session-related types for admin authentication.

use serde::{Deserialize, Serialize};

use vitrine_core::{AdminUserId, Permissions};

use super::admin_user::AdminUser;

/// Session-stored admin identity.
///
/// Minimal data persisted in the session storage to identify the logged-in
/// operator and answer permission checks without a database round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's database ID.
    pub id: AdminUserId,
    /// Login name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Granted permissions.
    pub permissions: Permissions,
}

impl CurrentAdmin {
    /// Whether this session holds `permission`.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

impl From<&AdminUser> for CurrentAdmin {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.to_string(),
            permissions: user.effective_permissions(),
        }
    }
}

/// Keys under which the session is persisted. Always written and removed as a pair.
pub mod keys {
    /// Serialized [`super::CurrentAdmin`] JSON.
    pub const ADMIN_USER: &str = "admin_user";

    /// Opaque token derived from the serialized session.
    pub const ADMIN_TOKEN: &str = "admin_token";
}
