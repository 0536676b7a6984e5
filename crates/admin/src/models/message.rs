//! WhatsApp contact messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use vitrine_core::{MessageId, MessageStatus};

/// One inbound contact submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppMessage {
    pub id: MessageId,
    pub name: String,
    pub phone: String,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WhatsAppMessage {
    /// Whether this message passes `filter`.
    ///
    /// Name and message text match case-insensitively; the phone matches on
    /// the raw search string.
    #[must_use]
    pub fn matches(&self, filter: &MessageFilter) -> bool {
        if filter.status.is_some_and(|status| status != self.status) {
            return false;
        }

        let search = filter.search.as_deref().map(str::trim).unwrap_or_default();
        if search.is_empty() {
            return true;
        }

        let needle = search.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.phone.contains(search)
            || self.message.to_lowercase().contains(&needle)
    }
}

/// A contact message to insert. Timestamps are stamped on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWhatsAppMessage {
    pub name: String,
    pub phone: String,
    pub message: String,
    #[serde(default)]
    pub status: MessageStatus,
}

/// Dashboard message table filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageFilter {
    /// Only messages with this status; all statuses when unset, blank or `all`.
    #[serde(default, deserialize_with = "status_or_all")]
    pub status: Option<MessageStatus>,
    /// Free-text search over name, phone and message.
    #[serde(default)]
    pub search: Option<String>,
}

fn status_or_all<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<MessageStatus>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("" | "all") => Ok(None),
        Some(label) => label.parse().map(Some).map_err(de::Error::custom),
    }
}
