//! Contact message triage routes.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use vitrine_core::{MessageId, MessageStatus};

use crate::error::AppError;
use crate::middleware::{RequireRead, RequireWrite};
use crate::models::{MessageFilter, WhatsAppMessage};
use crate::services::contact::reply_url;
use crate::services::{MessageService, filter_messages};
use crate::state::AppState;

/// One row of the message table.
#[derive(Debug, Serialize)]
pub struct MessageView {
    #[serde(flatten)]
    pub message: WhatsAppMessage,
    /// Link that opens a WhatsApp reply to the sender.
    pub reply_url: Option<String>,
}

impl From<WhatsAppMessage> for MessageView {
    fn from(message: WhatsAppMessage) -> Self {
        Self {
            reply_url: reply_url(&message),
            message,
        }
    }
}

/// Status change body.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: MessageStatus,
}

/// GET /api/messages?status=&search=
///
/// # Errors
///
/// Returns 500 if the message log cannot be read.
pub async fn index(
    _auth: RequireRead,
    State(state): State<AppState>,
    Query(filter): Query<MessageFilter>,
) -> Result<Json<Vec<MessageView>>, AppError> {
    let messages = MessageService::new(state.store()).list().await?;
    let rows = filter_messages(messages, &filter)
        .into_iter()
        .map(MessageView::from)
        .collect();
    Ok(Json(rows))
}

/// PATCH /api/messages/{id}/status
///
/// # Errors
///
/// Returns 404 if no message has this ID.
pub async fn update_status(
    RequireWrite(admin): RequireWrite,
    State(state): State<AppState>,
    Path(id): Path<MessageId>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<StatusCode, AppError> {
    MessageService::new(state.store())
        .update_status(id, body.status)
        .await?;
    tracing::debug!(admin_user_id = %admin.id, message_id = %id, "Status change applied");
    Ok(StatusCode::NO_CONTENT)
}
