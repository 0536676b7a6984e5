//! Admin authentication service.
//!
//! [`SessionManager`] authenticates operators with Argon2 password hashes and
//! keeps the logged-in session in memory, mirrored into a [`SessionStorage`]
//! so a later manager over the same storage can pick it up again.
//!
//! A manager is a plain value owned by its caller. The HTTP layer builds one
//! per request over the request's cookie session.

mod error;
mod password;
mod storage;
mod token;

pub use error::AuthError;
pub use password::{MIN_PASSWORD_LENGTH, hash_password, validate_password, verify_password};
pub use storage::{SessionStorage, StorageError};
pub use token::SessionKey;

use chrono::Utc;
use tracing::instrument;

use crate::db::AdminUserStore;
use crate::models::CurrentAdmin;
use crate::models::session_keys;

/// Operator session: Unauthenticated until `login`, back again on `logout`.
pub struct SessionManager<'a, U, K> {
    users: &'a U,
    storage: K,
    key: &'a SessionKey,
    current: Option<CurrentAdmin>,
}

impl<'a, U: AdminUserStore, K: SessionStorage> SessionManager<'a, U, K> {
    /// Create an unauthenticated manager.
    ///
    /// Nothing is read from `storage` until [`Self::current_user`] is called.
    #[must_use]
    pub const fn new(users: &'a U, storage: K, key: &'a SessionKey) -> Self {
        Self {
            users,
            storage,
            key,
            current: None,
        }
    }

    /// Authenticate with username and password.
    ///
    /// # Errors
    ///
    /// - `AuthError::UserNotFound` if no account has this username
    /// - `AuthError::InvalidPassword` if the password does not verify
    /// - `AuthError::Query` if the account lookup fails
    /// - `AuthError::Storage` if the session cannot be persisted; the manager
    ///   is left unauthenticated
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, username: &str, password: &str) -> Result<CurrentAdmin, AuthError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            return Err(password::reject_unknown_user(password));
        };

        if let Err(e) = verify_password(password, &user.password_hash) {
            tracing::info!(admin_user_id = %user.id, "Admin login rejected: wrong password");
            return Err(e);
        }

        let admin = CurrentAdmin::from(&user);

        if let Err(e) = self.users.touch_last_login(user.id, Utc::now()).await {
            tracing::warn!(admin_user_id = %user.id, error = %e, "Failed to record last login");
        }

        self.current = None;
        if let Err(e) = self.persist(&admin).await {
            self.clear_storage().await;
            return Err(e);
        }
        self.current = Some(admin.clone());

        tracing::info!(admin_user_id = %admin.id, "Admin logged in");
        Ok(admin)
    }

    /// End the session. Always succeeds, and repeated calls are harmless.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        if let Some(admin) = self.current.take() {
            tracing::info!(admin_user_id = %admin.id, "Admin logged out");
        }
        self.clear_storage().await;
    }

    /// The current session, rehydrating from storage on first use.
    ///
    /// Returns `None` when nothing is stored, either key is missing, the
    /// stored JSON does not parse, or the token does not match.
    pub async fn current_user(&mut self) -> Option<CurrentAdmin> {
        if let Some(admin) = &self.current {
            return Some(admin.clone());
        }

        let admin = self.rehydrate().await?;
        self.current = Some(admin.clone());
        Some(admin)
    }

    /// Whether a session exists.
    pub async fn is_authenticated(&mut self) -> bool {
        self.current_user().await.is_some()
    }

    /// Whether a session exists and holds `permission`.
    pub async fn has_permission(&mut self, permission: &str) -> bool {
        self.current_user()
            .await
            .is_some_and(|admin| admin.has_permission(permission))
    }

    /// Change the logged-in operator's password.
    ///
    /// # Errors
    ///
    /// - `AuthError::NotAuthenticated` without a session
    /// - `AuthError::PasswordMismatch` if `new_password != confirm`
    /// - `AuthError::WeakPassword` if the new password is too short
    /// - `AuthError::InvalidPassword` if `current_password` is wrong
    /// - `AuthError::Query` if the account cannot be read or updated
    #[instrument(skip_all)]
    pub async fn change_password(
        &mut self,
        current_password: &str,
        new_password: &str,
        confirm: &str,
    ) -> Result<(), AuthError> {
        let admin = self
            .current_user()
            .await
            .ok_or(AuthError::NotAuthenticated)?;

        if new_password != confirm {
            return Err(AuthError::PasswordMismatch);
        }
        validate_password(new_password)?;

        let user = self
            .users
            .find_by_id(admin.id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        verify_password(current_password, &user.password_hash)?;

        let hash = hash_password(new_password)?;
        self.users.update_password_hash(user.id, &hash).await?;

        tracing::info!(admin_user_id = %admin.id, "Admin password changed");
        Ok(())
    }

    async fn persist(&self, admin: &CurrentAdmin) -> Result<(), AuthError> {
        let json = serde_json::to_string(admin).map_err(|e| StorageError::new(e.to_string()))?;
        let token = self.key.token_for(&json);

        self.storage.set(session_keys::ADMIN_USER, json).await?;
        self.storage.set(session_keys::ADMIN_TOKEN, token).await?;
        Ok(())
    }

    async fn rehydrate(&self) -> Option<CurrentAdmin> {
        let json = self.read_key(session_keys::ADMIN_USER).await?;
        let token = self.read_key(session_keys::ADMIN_TOKEN).await?;

        if !self.key.verify(&json, &token) {
            tracing::warn!("Discarding stored session with invalid token");
            return None;
        }

        match serde_json::from_str(&json) {
            Ok(admin) => Some(admin),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored session");
                None
            }
        }
    }

    async fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read session storage");
                None
            }
        }
    }

    async fn clear_storage(&self) {
        for key in [session_keys::ADMIN_USER, session_keys::ADMIN_TOKEN] {
            if let Err(e) = self.storage.remove(key).await {
                tracing::warn!(key, error = %e, "Failed to clear session storage");
            }
        }
    }
}
