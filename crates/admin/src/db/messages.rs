//! WhatsApp message queries for `PostgreSQL`.
//!
//! Status is stored as its display label in a `TEXT` column guarded by a
//! `CHECK` constraint; rows that still fail to parse are reported as
//! [`RepositoryError::DataCorruption`].

use chrono::{DateTime, Utc};

use vitrine_core::{MessageId, MessageStatus};

use super::{MessageStore, PgStore, RepositoryError, count_to_u64};
use crate::models::{NewWhatsAppMessage, WhatsAppMessage};

/// Internal row type for `PostgreSQL` message queries.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: MessageId,
    name: String,
    phone: String,
    message: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for WhatsAppMessage {
    type Error = RepositoryError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            phone: row.phone,
            message: row.message,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn parse_status(raw: &str) -> Result<MessageStatus, RepositoryError> {
    raw.parse()
        .map_err(|e| RepositoryError::DataCorruption(format!("{e} in whatsapp_messages")))
}

impl MessageStore for PgStore {
    async fn count_messages(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM whatsapp_messages")
            .fetch_one(self.pool())
            .await?;
        count_to_u64(count)
    }

    async fn count_messages_with_status(
        &self,
        status: MessageStatus,
    ) -> Result<u64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM whatsapp_messages WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(self.pool())
                .await?;
        count_to_u64(count)
    }

    async fn message_statuses(&self) -> Result<Vec<MessageStatus>, RepositoryError> {
        let raw: Vec<String> =
            sqlx::query_scalar("SELECT status FROM whatsapp_messages ORDER BY status")
                .fetch_all(self.pool())
                .await?;

        raw.iter().map(|s| parse_status(s)).collect()
    }

    async fn list_messages(&self) -> Result<Vec<WhatsAppMessage>, RepositoryError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r"
            SELECT id, name, phone, message, status, created_at, updated_at
            FROM whatsapp_messages
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update_message_status(
        &self,
        id: MessageId,
        status: MessageStatus,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE whatsapp_messages SET status = $2, updated_at = $3 WHERE id = $1")
                .bind(id)
                .bind(status.as_str())
                .bind(at)
                .execute(self.pool())
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn insert_message(
        &self,
        message: &NewWhatsAppMessage,
        at: DateTime<Utc>,
    ) -> Result<WhatsAppMessage, RepositoryError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r"
            INSERT INTO whatsapp_messages (id, name, phone, message, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, name, phone, message, status, created_at, updated_at
            ",
        )
        .bind(MessageId::new())
        .bind(&message.name)
        .bind(&message.phone)
        .bind(&message.message)
        .bind(message.status.as_str())
        .bind(at)
        .fetch_one(self.pool())
        .await?;

        row.try_into()
    }
}
