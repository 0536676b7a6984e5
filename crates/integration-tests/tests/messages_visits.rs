//! Integration tests for the message, visit, settings and contact services.

#![allow(clippy::unwrap_used)]

use chrono::{TimeDelta, Utc};
use serde_json::json;

use vitrine_admin::db::{RepositoryError, SettingsStore};
use vitrine_admin::models::{
    GeneralSettings, MessageFilter, NewSiteVisit, NewWhatsAppMessage, NotificationSettings,
    ProfileSettings, SettingsSection, SettingsUpdate, SiteSettings,
};
use vitrine_admin::services::contact::reply_url;
use vitrine_admin::services::{
    ContactSubmission, MessageService, SettingsService, StatsService, VisitService,
    filter_messages,
};
use vitrine_core::{MessageId, MessageStatus};
use vitrine_integration_tests::{MemoryStore, StoreOp};

// =============================================================================
// Messages
// =============================================================================

#[tokio::test]
async fn test_list_newest_first() {
    let store = MemoryStore::new();
    let now = Utc::now();
    let old = store.add_message_at("Ana", MessageStatus::Finalizado, now - TimeDelta::days(3));
    let new = store.add_message_at("Bruno", MessageStatus::Aguardando, now);
    let mid = store.add_message_at("Carla", MessageStatus::EmPreparo, now - TimeDelta::days(1));

    let ids: Vec<MessageId> = MessageService::new(&store)
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, [new.id, mid.id, old.id]);
}

#[tokio::test]
async fn test_list_surfaces_store_error() {
    let store = MemoryStore::new();
    store.fail(StoreOp::ListMessages);
    assert!(MessageService::new(&store).list().await.is_err());
}

#[tokio::test]
async fn test_update_status_stamps_updated_at() {
    let store = MemoryStore::new();
    let created = Utc::now() - TimeDelta::hours(2);
    let message = store.add_message_at("Ana", MessageStatus::Aguardando, created);

    MessageService::new(&store)
        .update_status(message.id, MessageStatus::EmPreparo)
        .await
        .unwrap();

    let stored = store.message(message.id).unwrap();
    assert_eq!(stored.status, MessageStatus::EmPreparo);
    assert_eq!(stored.created_at, created);
    assert!(stored.updated_at > created);
}

#[tokio::test]
async fn test_update_status_unknown_id() {
    let store = MemoryStore::new();
    let result = MessageService::new(&store)
        .update_status(MessageId::new(), MessageStatus::Finalizado)
        .await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_add_stamps_both_timestamps() {
    let store = MemoryStore::new();
    let stored = MessageService::new(&store)
        .add(&NewWhatsAppMessage {
            name: "Ana".to_string(),
            phone: "5511912345678".to_string(),
            message: "Oi".to_string(),
            status: MessageStatus::default(),
        })
        .await
        .unwrap();

    assert_eq!(stored.status, MessageStatus::Aguardando);
    assert_eq!(stored.created_at, stored.updated_at);
    assert_eq!(store.message(stored.id), Some(stored));
}

#[tokio::test]
async fn test_filter_listed_messages() {
    let store = MemoryStore::new();
    let now = Utc::now();
    store.add_message_at("Ana Souza", MessageStatus::Aguardando, now);
    store.add_message_at("Bruno", MessageStatus::Aguardando, now - TimeDelta::minutes(5));
    store.add_message_at("Carla", MessageStatus::Finalizado, now - TimeDelta::minutes(10));

    let all = MessageService::new(&store).list().await.unwrap();

    let pending = filter_messages(
        all.clone(),
        &MessageFilter {
            status: Some(MessageStatus::Aguardando),
            search: None,
        },
    );
    let names: Vec<_> = pending.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Ana Souza", "Bruno"]);

    let searched = filter_messages(
        all,
        &MessageFilter {
            status: None,
            search: Some("souza".to_string()),
        },
    );
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].name, "Ana Souza");
}

// =============================================================================
// Visits
// =============================================================================

#[tokio::test]
async fn test_recent_visits_order_and_limit() {
    let store = MemoryStore::new();
    let now = Utc::now();
    for minutes in 0..5 {
        store.add_visit_at(&format!("/p/{minutes}"), now - TimeDelta::minutes(minutes));
    }

    let service = VisitService::new(&store);

    let two = service.recent(Some(2)).await.unwrap();
    let pages: Vec<_> = two.iter().map(|v| v.page_url.as_str()).collect();
    assert_eq!(pages, ["/p/0", "/p/1"]);

    assert_eq!(service.recent(None).await.unwrap().len(), 5);
    assert_eq!(service.recent(Some(0)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_record_visit() {
    let store = MemoryStore::new();
    let service = VisitService::new(&store);

    let stored = service
        .record(&NewSiteVisit {
            ip_address: "198.51.100.7".to_string(),
            page_url: "/portfolio".to_string(),
            user_agent: Some("Mozilla/5.0".to_string()),
            referrer: None,
        })
        .await
        .unwrap();

    assert_eq!(stored.page_url, "/portfolio");
    assert_eq!(stored.ip_address, "198.51.100.7");

    let recent = service.recent(None).await.unwrap();
    assert_eq!(recent, vec![stored]);
}

#[tokio::test]
async fn test_recent_visits_surfaces_store_error() {
    let store = MemoryStore::new();
    store.fail(StoreOp::RecentVisits);
    assert!(VisitService::new(&store).recent(None).await.is_err());
}

// =============================================================================
// Settings
// =============================================================================

#[tokio::test]
async fn test_settings_default_when_unsaved() {
    let store = MemoryStore::new();
    let settings = SettingsService::new(&store).load().await.unwrap();
    assert_eq!(settings, SiteSettings::default());
    assert_eq!(settings.general.language, "pt-BR");
}

#[tokio::test]
async fn test_save_section_replaces_only_that_section() {
    let store = MemoryStore::new();
    let service = SettingsService::new(&store);

    let general = GeneralSettings {
        language: "en-US".to_string(),
        auto_backup: false,
        ..GeneralSettings::default()
    };
    service
        .save_section(&SettingsUpdate::General(general.clone()))
        .await
        .unwrap();

    let settings = service.load().await.unwrap();
    assert_eq!(settings.general, general);
    assert_eq!(settings.notifications, NotificationSettings::default());
    assert!(store.setting(SettingsSection::General.key()).is_some());
    assert!(store.setting(SettingsSection::Profile.key()).is_none());
}

#[tokio::test]
async fn test_partial_stored_section_fills_defaults() {
    let store = MemoryStore::new();
    store
        .put_setting(
            SettingsSection::Notifications.key(),
            &json!({"weekly_report": false, "retired_flag": true}),
        )
        .await
        .unwrap();

    let settings = SettingsService::new(&store).load().await.unwrap();
    assert!(!settings.notifications.weekly_report);
    assert!(settings.notifications.message_alerts);
}

#[tokio::test]
async fn test_corrupted_section_is_reported() {
    let store = MemoryStore::new();
    store
        .put_setting(SettingsSection::General.key(), &json!({"auto_backup": "sometimes"}))
        .await
        .unwrap();

    let result = SettingsService::new(&store).load().await;
    assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
}

// =============================================================================
// Contact hand-off
// =============================================================================

#[tokio::test]
async fn test_contact_submission_lands_in_pending_queue() {
    let store = MemoryStore::new();
    let contact = ContactSubmission {
        name: "Júlia".to_string(),
        email: "julia@marca.com.br".to_string(),
        company: Some("Marca Ltda".to_string()),
        phone: "+55 (11) 98765-4321".to_string(),
        message: "Quero um orçamento".to_string(),
    }
    .validate()
    .unwrap();

    let stored = MessageService::new(&store)
        .add(&contact.into_new_message())
        .await
        .unwrap();
    assert_eq!(stored.phone, "5511987654321");
    assert_eq!(stored.status, MessageStatus::Aguardando);

    let stats = StatsService::new(&store, &store).dashboard_stats().await;
    assert_eq!(stats.total_messages, 1);
    assert_eq!(stats.pending_messages, 1);

    let reply = reply_url(&stored).unwrap();
    assert!(reply.starts_with("https://wa.me/5511987654321?text=Ol%C3%A1%20J%C3%BAlia"));
}

#[tokio::test]
async fn test_saved_profile_name_greets_owner() {
    let store = MemoryStore::new();
    let service = SettingsService::new(&store);
    assert_eq!(
        service.profile().await.unwrap().first_name(),
        Some("Amanda")
    );

    service
        .save_section(&SettingsUpdate::Profile(ProfileSettings {
            display_name: "Carla Souza".to_string(),
            ..ProfileSettings::default()
        }))
        .await
        .unwrap();

    let profile = service.profile().await.unwrap();
    let contact = ContactSubmission {
        name: "Júlia".to_string(),
        email: "julia@marca.com.br".to_string(),
        company: None,
        phone: "11987654321".to_string(),
        message: "Oi".to_string(),
    }
    .validate()
    .unwrap();
    assert!(
        contact
            .whatsapp_text(profile.first_name())
            .starts_with("Olá Carla! Me chamo Júlia.")
    );
}
