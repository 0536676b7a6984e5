//! Contact message listing and triage.

use chrono::Utc;
use tracing::instrument;

use vitrine_core::{MessageId, MessageStatus};

use crate::db::{MessageStore, RepositoryError};
use crate::models::{MessageFilter, NewWhatsAppMessage, WhatsAppMessage};

/// Read and update the contact message log.
pub struct MessageService<'a, M> {
    store: &'a M,
}

impl<'a, M: MessageStore> MessageService<'a, M> {
    #[must_use]
    pub const fn new(store: &'a M) -> Self {
        Self { store }
    }

    /// All messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the log cannot be read.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<WhatsAppMessage>, RepositoryError> {
        self.store.list_messages().await
    }

    /// Move a message to `status`, stamping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no message has this ID.
    #[instrument(skip(self), fields(message_id = %id, status = %status))]
    pub async fn update_status(
        &self,
        id: MessageId,
        status: MessageStatus,
    ) -> Result<(), RepositoryError> {
        self.store.update_message_status(id, status, Utc::now()).await?;
        tracing::info!("Message status updated");
        Ok(())
    }

    /// Store a new message, stamping both timestamps.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert fails.
    #[instrument(skip(self, message))]
    pub async fn add(&self, message: &NewWhatsAppMessage) -> Result<WhatsAppMessage, RepositoryError> {
        let stored = self.store.insert_message(message, Utc::now()).await?;
        tracing::info!(message_id = %stored.id, "Message stored");
        Ok(stored)
    }
}

/// Keep the messages that pass `filter`, preserving order.
#[must_use]
pub fn filter_messages(messages: Vec<WhatsAppMessage>, filter: &MessageFilter) -> Vec<WhatsAppMessage> {
    messages.into_iter().filter(|m| m.matches(filter)).collect()
}
