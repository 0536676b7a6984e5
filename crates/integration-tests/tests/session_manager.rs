//! Integration tests for the operator session manager.
//!
//! These run the full login/rehydrate/logout cycle against the in-memory
//! account store and session storage.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;

use vitrine_admin::models::{CurrentAdmin, session_keys};
use vitrine_admin::services::{AuthError, SessionKey, SessionManager};
use vitrine_core::Permissions;
use vitrine_integration_tests::{MemorySessionStorage, MemoryStore, StoreOp, test_session_key};

const PASSWORD: &str = "c0rrect-horse-battery";

fn store_with_amanda() -> MemoryStore {
    let store = MemoryStore::new();
    store.add_user("amanda", "amanda@exemplo.com.br", PASSWORD, None);
    store
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_grants_default_permissions() {
    let store = store_with_amanda();
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    let mut manager = SessionManager::new(&store, storage.clone(), &key);

    let admin = manager.login("amanda", PASSWORD).await.unwrap();

    assert_eq!(admin.username, "amanda");
    assert_eq!(admin.email, "amanda@exemplo.com.br");
    assert_eq!(admin.permissions, Permissions::default_set());
    assert!(manager.is_authenticated().await);
    assert!(manager.has_permission("read").await);
    assert!(manager.has_permission("write").await);
    assert!(!manager.has_permission("delete").await);

    assert!(storage.raw(session_keys::ADMIN_USER).is_some());
    assert!(storage.raw(session_keys::ADMIN_TOKEN).is_some());
    assert!(store.user(admin.id).unwrap().last_login.is_some());
}

#[tokio::test]
async fn test_empty_stored_permissions_grant_nothing() {
    let store = MemoryStore::new();
    store.add_user("bia", "bia@exemplo.com", PASSWORD, Some(Permissions::default()));
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    let mut manager = SessionManager::new(&store, storage.clone(), &key);

    let admin = manager.login("bia", PASSWORD).await.unwrap();
    assert!(admin.permissions.is_empty());
    assert!(manager.is_authenticated().await);
    assert!(!manager.has_permission("read").await);
    assert!(!manager.has_permission("write").await);

    let mut fresh = SessionManager::new(&store, storage, &key);
    assert!(!fresh.has_permission("read").await);
}

#[tokio::test]
async fn test_explicit_permissions_are_kept() {
    let store = MemoryStore::new();
    store.add_user(
        "leitura",
        "leitura@exemplo.com",
        PASSWORD,
        Some(["read"].into_iter().collect()),
    );
    let key = test_session_key();
    let mut manager = SessionManager::new(&store, MemorySessionStorage::new(), &key);

    manager.login("leitura", PASSWORD).await.unwrap();
    assert!(manager.has_permission("read").await);
    assert!(!manager.has_permission("write").await);
}

#[tokio::test]
async fn test_unknown_user() {
    let store = store_with_amanda();
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    let mut manager = SessionManager::new(&store, storage.clone(), &key);

    let err = manager.login("ghost", PASSWORD).await.unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
    assert!(!manager.is_authenticated().await);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_wrong_password_is_not_persisted() {
    let store = store_with_amanda();
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    let mut manager = SessionManager::new(&store, storage.clone(), &key);

    let err = manager.login("amanda", "wrong-password").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidPassword));
    assert!(err.is_credential_failure());
    assert!(!manager.is_authenticated().await);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_admin123_is_not_a_master_password() {
    let store = store_with_amanda();
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    let mut manager = SessionManager::new(&store, storage.clone(), &key);

    let err = manager.login("amanda", "admin123").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidPassword));
    assert!(manager.current_user().await.is_none());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_lookup_failure_is_query_error() {
    let store = store_with_amanda();
    store.fail(StoreOp::FindUser);
    let key = test_session_key();
    let mut manager = SessionManager::new(&store, MemorySessionStorage::new(), &key);

    let err = manager.login("amanda", PASSWORD).await.unwrap_err();
    assert!(matches!(err, AuthError::Query(_)));
    assert!(!err.is_credential_failure());
}

#[tokio::test]
async fn test_last_login_failure_does_not_block_login() {
    let store = store_with_amanda();
    store.fail(StoreOp::TouchLastLogin);
    let key = test_session_key();
    let mut manager = SessionManager::new(&store, MemorySessionStorage::new(), &key);

    let admin = manager.login("amanda", PASSWORD).await.unwrap();
    assert!(store.user(admin.id).unwrap().last_login.is_none());
    assert!(manager.is_authenticated().await);
}

#[tokio::test]
async fn test_storage_failure_leaves_manager_logged_out() {
    let store = store_with_amanda();
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    storage.fail_writes();
    let mut manager = SessionManager::new(&store, storage.clone(), &key);

    let err = manager.login("amanda", PASSWORD).await.unwrap_err();
    assert!(matches!(err, AuthError::Storage(_)));
    assert!(!manager.is_authenticated().await);
    assert!(storage.is_empty());
}

// =============================================================================
// Rehydration
// =============================================================================

#[tokio::test]
async fn test_fresh_manager_rehydrates_same_session() {
    let store = store_with_amanda();
    let key = test_session_key();
    let storage = MemorySessionStorage::new();

    let admin = SessionManager::new(&store, storage.clone(), &key)
        .login("amanda", PASSWORD)
        .await
        .unwrap();

    let mut fresh = SessionManager::new(&store, storage.clone(), &key);
    assert_eq!(fresh.current_user().await, Some(admin));
    assert!(fresh.has_permission("write").await);
}

#[tokio::test]
async fn test_rehydrate_does_not_write_storage() {
    let store = store_with_amanda();
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    SessionManager::new(&store, storage.clone(), &key)
        .login("amanda", PASSWORD)
        .await
        .unwrap();
    let before = storage.raw(session_keys::ADMIN_TOKEN);

    storage.fail_writes();
    let mut fresh = SessionManager::new(&store, storage.clone(), &key);
    assert!(fresh.current_user().await.is_some());
    assert_eq!(storage.raw(session_keys::ADMIN_TOKEN), before);
}

#[tokio::test]
async fn test_empty_storage_means_no_session() {
    let store = store_with_amanda();
    let key = test_session_key();
    let mut manager = SessionManager::new(&store, MemorySessionStorage::new(), &key);

    assert!(manager.current_user().await.is_none());
    assert!(!manager.is_authenticated().await);
    assert!(!manager.has_permission("read").await);
}

#[tokio::test]
async fn test_missing_token_means_no_session() {
    let store = store_with_amanda();
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    SessionManager::new(&store, storage.clone(), &key)
        .login("amanda", PASSWORD)
        .await
        .unwrap();

    let only_user = MemorySessionStorage::new();
    only_user.put_raw(
        session_keys::ADMIN_USER,
        &storage.raw(session_keys::ADMIN_USER).unwrap(),
    );

    let mut fresh = SessionManager::new(&store, only_user, &key);
    assert!(fresh.current_user().await.is_none());
}

#[tokio::test]
async fn test_unparsable_session_means_no_session() {
    let store = store_with_amanda();
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    storage.put_raw(session_keys::ADMIN_USER, "{not json");
    storage.put_raw(session_keys::ADMIN_TOKEN, &key.token_for("{not json"));

    let mut manager = SessionManager::new(&store, storage, &key);
    assert!(manager.current_user().await.is_none());
}

#[tokio::test]
async fn test_edited_session_is_rejected() {
    let store = MemoryStore::new();
    store.add_user(
        "leitura",
        "leitura@exemplo.com",
        PASSWORD,
        Some(["read"].into_iter().collect()),
    );
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    SessionManager::new(&store, storage.clone(), &key)
        .login("leitura", PASSWORD)
        .await
        .unwrap();

    let mut session: CurrentAdmin =
        serde_json::from_str(&storage.raw(session_keys::ADMIN_USER).unwrap()).unwrap();
    session.permissions = Permissions::default_set();
    storage.put_raw(
        session_keys::ADMIN_USER,
        &serde_json::to_string(&session).unwrap(),
    );

    let mut fresh = SessionManager::new(&store, storage, &key);
    assert!(fresh.current_user().await.is_none());
    assert!(!fresh.has_permission("write").await);
}

#[tokio::test]
async fn test_session_from_other_key_is_rejected() {
    let store = store_with_amanda();
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    SessionManager::new(&store, storage.clone(), &key)
        .login("amanda", PASSWORD)
        .await
        .unwrap();

    let rotated = SessionKey::new(&SecretString::from("Zr8!mQ2#vL5@kW9$pN3^tH7&cX1*bJ4d")).unwrap();
    let mut fresh = SessionManager::new(&store, storage, &rotated);
    assert!(fresh.current_user().await.is_none());
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn test_logout_clears_memory_and_storage() {
    let store = store_with_amanda();
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    let mut manager = SessionManager::new(&store, storage.clone(), &key);
    manager.login("amanda", PASSWORD).await.unwrap();

    manager.logout().await;

    assert!(!manager.is_authenticated().await);
    assert!(storage.raw(session_keys::ADMIN_USER).is_none());
    assert!(storage.raw(session_keys::ADMIN_TOKEN).is_none());

    let mut fresh = SessionManager::new(&store, storage, &key);
    assert!(fresh.current_user().await.is_none());
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let store = store_with_amanda();
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    let mut manager = SessionManager::new(&store, storage.clone(), &key);

    manager.logout().await;
    manager.logout().await;
    assert!(!manager.is_authenticated().await);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_relogin_as_other_user_replaces_session() {
    let store = store_with_amanda();
    store.add_user("bruno", "bruno@exemplo.com", "outra-senha-forte", None);
    let key = test_session_key();
    let storage = MemorySessionStorage::new();
    let mut manager = SessionManager::new(&store, storage.clone(), &key);

    manager.login("amanda", PASSWORD).await.unwrap();
    let bruno = manager.login("bruno", "outra-senha-forte").await.unwrap();

    let mut fresh = SessionManager::new(&store, storage, &key);
    assert_eq!(fresh.current_user().await, Some(bruno));
}

// =============================================================================
// Password change
// =============================================================================

#[tokio::test]
async fn test_change_password() {
    let store = store_with_amanda();
    let key = test_session_key();
    let mut manager = SessionManager::new(&store, MemorySessionStorage::new(), &key);
    manager.login("amanda", PASSWORD).await.unwrap();

    manager
        .change_password(PASSWORD, "nova-senha-123", "nova-senha-123")
        .await
        .unwrap();

    let mut other = SessionManager::new(&store, MemorySessionStorage::new(), &key);
    assert!(matches!(
        other.login("amanda", PASSWORD).await,
        Err(AuthError::InvalidPassword)
    ));
    assert!(other.login("amanda", "nova-senha-123").await.is_ok());
}

#[tokio::test]
async fn test_change_password_rejections() {
    let store = store_with_amanda();
    let key = test_session_key();
    let mut manager = SessionManager::new(&store, MemorySessionStorage::new(), &key);

    assert!(matches!(
        manager.change_password(PASSWORD, "nova-senha-123", "nova-senha-123").await,
        Err(AuthError::NotAuthenticated)
    ));

    manager.login("amanda", PASSWORD).await.unwrap();

    assert!(matches!(
        manager.change_password(PASSWORD, "nova-senha-123", "nova-senha-456").await,
        Err(AuthError::PasswordMismatch)
    ));
    assert!(matches!(
        manager.change_password(PASSWORD, "curta", "curta").await,
        Err(AuthError::WeakPassword(_))
    ));
    assert!(matches!(
        manager.change_password("errada", "nova-senha-123", "nova-senha-123").await,
        Err(AuthError::InvalidPassword)
    ));

    // Nothing changed
    let mut other = SessionManager::new(&store, MemorySessionStorage::new(), &key);
    assert!(other.login("amanda", PASSWORD).await.is_ok());
}
