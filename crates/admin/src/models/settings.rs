//! Typed dashboard settings.
//!
//! Each section is an explicit record and is stored as its own JSON document
//! keyed by [`SettingsSection::key`]. Missing sections fall back to
//! [`Default`], and unknown fields in stored JSON are ignored.

use serde::{Deserialize, Serialize};

/// Public profile shown on the site.
///
/// `display_name` also names the owner in contact form greetings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub display_name: String,
    pub email: String,
    pub bio: String,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            display_name: "Amanda Lima".to_string(),
            email: "admin@amandalima.com".to_string(),
            bio: "Influenciadora Digital & Criadora de Conteúdo".to_string(),
        }
    }
}

impl ProfileSettings {
    /// First word of the display name, if any.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.display_name.split_whitespace().next()
    }
}

/// Account security toggles. Password changes are not settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    pub two_factor: bool,
}

/// Operator notification preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub weekly_report: bool,
    pub message_alerts: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: true,
            weekly_report: true,
            message_alerts: true,
        }
    }
}

/// Locale and housekeeping preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub language: String,
    pub timezone: String,
    pub date_format: String,
    pub auto_backup: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            language: "pt-BR".to_string(),
            timezone: "America/Sao_Paulo".to_string(),
            date_format: "DD/MM/YYYY".to_string(),
            auto_backup: true,
        }
    }
}

/// All settings sections together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub profile: ProfileSettings,
    pub security: SecuritySettings,
    pub notifications: NotificationSettings,
    pub general: GeneralSettings,
}

/// Identifies one settings section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsSection {
    Profile,
    Security,
    Notifications,
    General,
}

impl SettingsSection {
    /// Every section, in dashboard tab order.
    pub const ALL: [Self; 4] = [
        Self::Profile,
        Self::Security,
        Self::Notifications,
        Self::General,
    ];

    /// Storage key for this section.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Profile => "settings.profile",
            Self::Security => "settings.security",
            Self::Notifications => "settings.notifications",
            Self::General => "settings.general",
        }
    }
}

/// A replacement for exactly one section.
///
/// Deserializes from `{"section": "general", "values": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", content = "values", rename_all = "snake_case")]
pub enum SettingsUpdate {
    Profile(ProfileSettings),
    Security(SecuritySettings),
    Notifications(NotificationSettings),
    General(GeneralSettings),
}

impl SettingsUpdate {
    /// Section this update replaces.
    #[must_use]
    pub const fn section(&self) -> SettingsSection {
        match self {
            Self::Profile(_) => SettingsSection::Profile,
            Self::Security(_) => SettingsSection::Security,
            Self::Notifications(_) => SettingsSection::Notifications,
            Self::General(_) => SettingsSection::General,
        }
    }

    /// Section values as JSON for storage.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Profile(v) => serde_json::to_value(v),
            Self::Security(v) => serde_json::to_value(v),
            Self::Notifications(v) => serde_json::to_value(v),
            Self::General(v) => serde_json::to_value(v),
        }
    }

    /// Apply this update to an in-memory settings value.
    pub fn apply(self, settings: &mut SiteSettings) {
        match self {
            Self::Profile(v) => settings.profile = v,
            Self::Security(v) => settings.security = v,
            Self::Notifications(v) => settings.notifications = v,
            Self::General(v) => settings.general = v,
        }
    }
}
