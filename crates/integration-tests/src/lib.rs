//! Integration test support for Vitrine.
//!
//! Provides in-memory implementations of the dashboard store traits and of
//! session storage, so services can be exercised end to end without a
//! database.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use vitrine_admin::db::{
    AdminUserStore, MessageStore, RepositoryError, SettingsStore, VisitStore,
};
use vitrine_admin::models::{
    AdminUser, NewAdminUser, NewSiteVisit, NewWhatsAppMessage, SiteVisit, WhatsAppMessage,
};
use vitrine_admin::services::auth::hash_password;
use vitrine_admin::services::{SessionKey, SessionStorage, StorageError};
use vitrine_core::{AdminUserId, Email, MessageId, MessageStatus, Permissions, SiteVisitId};

/// Session secret used by tests.
pub const TEST_SESSION_SECRET: &str = "tK7#qv2L!x9Rm4@Pz8Wn3$Hc6^Jd1&Fg";

/// A [`SessionKey`] for tests.
///
/// # Panics
///
/// Never in practice: HMAC accepts keys of any length.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_session_key() -> SessionKey {
    SessionKey::new(&SecretString::from(TEST_SESSION_SECRET)).expect("hmac accepts any key")
}

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    FindUser,
    TouchLastLogin,
    CountVisits,
    CountVisitsBetween,
    VisitTimestamps,
    RecentVisits,
    CountMessages,
    CountMessagesWithStatus,
    MessageStatuses,
    ListMessages,
}

#[derive(Default)]
struct Tables {
    users: Vec<AdminUser>,
    visits: Vec<SiteVisit>,
    messages: Vec<WhatsAppMessage>,
    settings: HashMap<String, serde_json::Value>,
    failing: HashSet<StoreOp>,
}

/// In-memory implementation of every store trait.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self, op: StoreOp) -> Result<(), RepositoryError> {
        if self.tables().failing.contains(&op) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    /// Make `op` fail with a database error from now on.
    pub fn fail(&self, op: StoreOp) {
        self.tables().failing.insert(op);
    }

    /// Add an account whose password hashes `password`.
    ///
    /// # Panics
    ///
    /// Panics if `email` is not a valid address or hashing fails.
    #[allow(clippy::expect_used)]
    pub fn add_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        permissions: Option<Permissions>,
    ) -> AdminUser {
        let user = AdminUser {
            id: AdminUserId::new(),
            username: username.to_owned(),
            email: Email::parse(email).expect("valid test email"),
            permissions,
            password_hash: hash_password(password).expect("hash test password"),
            created_at: Utc::now(),
            last_login: None,
        };
        self.tables().users.push(user.clone());
        user
    }

    /// Current copy of an account.
    #[must_use]
    pub fn user(&self, id: AdminUserId) -> Option<AdminUser> {
        self.tables().users.iter().find(|u| u.id == id).cloned()
    }

    /// Record a visit at `at` without going through a service.
    pub fn add_visit_at(&self, page_url: &str, at: DateTime<Utc>) -> SiteVisit {
        let visit = SiteVisit {
            id: SiteVisitId::new(),
            ip_address: "203.0.113.10".to_owned(),
            page_url: page_url.to_owned(),
            user_agent: None,
            referrer: None,
            created_at: at,
        };
        self.tables().visits.push(visit.clone());
        visit
    }

    /// Store a message at `at` without going through a service.
    pub fn add_message_at(&self, name: &str, status: MessageStatus, at: DateTime<Utc>) -> WhatsAppMessage {
        let message = WhatsAppMessage {
            id: MessageId::new(),
            name: name.to_owned(),
            phone: "5511900000000".to_owned(),
            message: format!("Mensagem de {name}"),
            status,
            created_at: at,
            updated_at: at,
        };
        self.tables().messages.push(message.clone());
        message
    }

    /// Current copy of a message.
    #[must_use]
    pub fn message(&self, id: MessageId) -> Option<WhatsAppMessage> {
        self.tables().messages.iter().find(|m| m.id == id).cloned()
    }

    /// Stored settings document.
    #[must_use]
    pub fn setting(&self, key: &str) -> Option<serde_json::Value> {
        self.tables().settings.get(key).cloned()
    }
}

fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

impl AdminUserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepositoryError> {
        self.check(StoreOp::FindUser)?;
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: AdminUserId) -> Result<Option<AdminUser>, RepositoryError> {
        self.check(StoreOp::FindUser)?;
        Ok(self.user(id))
    }

    async fn touch_last_login(&self, id: AdminUserId, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        self.check(StoreOp::TouchLastLogin)?;
        if let Some(user) = self.tables().users.iter_mut().find(|u| u.id == id) {
            user.last_login = Some(at);
        }
        Ok(())
    }

    async fn update_password_hash(&self, id: AdminUserId, password_hash: &str) -> Result<(), RepositoryError> {
        let mut tables = self.tables();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;
        password_hash.clone_into(&mut user.password_hash);
        Ok(())
    }

    async fn create(&self, user: &NewAdminUser) -> Result<AdminUser, RepositoryError> {
        let mut tables = self.tables();
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict("username already exists".to_owned()));
        }
        let created = AdminUser {
            id: AdminUserId::new(),
            username: user.username.clone(),
            email: user.email.clone(),
            permissions: user.permissions.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
            last_login: None,
        };
        tables.users.push(created.clone());
        Ok(created)
    }
}

impl VisitStore for MemoryStore {
    async fn count_visits(&self) -> Result<u64, RepositoryError> {
        self.check(StoreOp::CountVisits)?;
        Ok(count(self.tables().visits.len()))
    }

    async fn count_visits_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        self.check(StoreOp::CountVisitsBetween)?;
        let tables = self.tables();
        Ok(count(
            tables
                .visits
                .iter()
                .filter(|v| v.created_at >= start && v.created_at <= end)
                .count(),
        ))
    }

    async fn visit_timestamps_since(&self, since: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, RepositoryError> {
        self.check(StoreOp::VisitTimestamps)?;
        let mut stamps: Vec<_> = self
            .tables()
            .visits
            .iter()
            .map(|v| v.created_at)
            .filter(|at| *at >= since)
            .collect();
        stamps.sort_unstable();
        Ok(stamps)
    }

    async fn recent_visits(&self, limit: u32) -> Result<Vec<SiteVisit>, RepositoryError> {
        self.check(StoreOp::RecentVisits)?;
        let mut visits = self.tables().visits.clone();
        visits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        visits.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(visits)
    }

    async fn insert_visit(&self, visit: &NewSiteVisit, at: DateTime<Utc>) -> Result<SiteVisit, RepositoryError> {
        let stored = SiteVisit {
            id: SiteVisitId::new(),
            ip_address: visit.ip_address.clone(),
            page_url: visit.page_url.clone(),
            user_agent: visit.user_agent.clone(),
            referrer: visit.referrer.clone(),
            created_at: at,
        };
        self.tables().visits.push(stored.clone());
        Ok(stored)
    }
}

impl MessageStore for MemoryStore {
    async fn count_messages(&self) -> Result<u64, RepositoryError> {
        self.check(StoreOp::CountMessages)?;
        Ok(count(self.tables().messages.len()))
    }

    async fn count_messages_with_status(&self, status: MessageStatus) -> Result<u64, RepositoryError> {
        self.check(StoreOp::CountMessagesWithStatus)?;
        let tables = self.tables();
        Ok(count(
            tables.messages.iter().filter(|m| m.status == status).count(),
        ))
    }

    async fn message_statuses(&self) -> Result<Vec<MessageStatus>, RepositoryError> {
        self.check(StoreOp::MessageStatuses)?;
        let mut statuses: Vec<_> = self.tables().messages.iter().map(|m| m.status).collect();
        statuses.sort_unstable();
        Ok(statuses)
    }

    async fn list_messages(&self) -> Result<Vec<WhatsAppMessage>, RepositoryError> {
        self.check(StoreOp::ListMessages)?;
        let mut messages = self.tables().messages.clone();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn update_message_status(
        &self,
        id: MessageId,
        status: MessageStatus,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.tables();
        let message = tables
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(RepositoryError::NotFound)?;
        message.status = status;
        message.updated_at = at;
        Ok(())
    }

    async fn insert_message(
        &self,
        message: &NewWhatsAppMessage,
        at: DateTime<Utc>,
    ) -> Result<WhatsAppMessage, RepositoryError> {
        let stored = WhatsAppMessage {
            id: MessageId::new(),
            name: message.name.clone(),
            phone: message.phone.clone(),
            message: message.message.clone(),
            status: message.status,
            created_at: at,
            updated_at: at,
        };
        self.tables().messages.push(stored.clone());
        Ok(stored)
    }
}

impl SettingsStore for MemoryStore {
    async fn get_setting(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        Ok(self.setting(key))
    }

    async fn put_setting(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        self.tables().settings.insert(key.to_owned(), value.clone());
        Ok(())
    }
}

/// In-memory session storage. Clones share the same map, like two requests
/// carrying the same session cookie.
#[derive(Clone, Default)]
pub struct MemorySessionStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemorySessionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Raw stored value.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values().get(key).cloned()
    }

    /// Overwrite a stored value directly.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.values().insert(key.to_owned(), value.to_owned());
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Make every `set` fail from now on.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

impl SessionStorage for MemorySessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::new("storage unavailable"));
        }
        self.values().insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values().remove(key);
        Ok(())
    }
}
