//! Public contact form route.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::services::{ContactSubmission, MessageService, SettingsService};
use crate::state::AppState;

/// Response for a stored submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    /// `wa.me` link the site opens next.
    pub whatsapp_url: String,
}

/// POST /api/contact
///
/// Stores the submission as a pending message and returns the WhatsApp link.
/// The chat greets the owner by the first word of the profile display name;
/// an unreadable profile only drops the name from the greeting.
///
/// # Errors
///
/// Returns 400 if a field is missing or malformed.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactSubmission>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    let contact = form.validate()?;
    let profile = match SettingsService::new(state.store()).profile().await {
        Ok(profile) => Some(profile),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load profile for contact greeting");
            None
        }
    };
    let owner_name = profile.as_ref().and_then(|p| p.first_name());
    let whatsapp_url = contact.whatsapp_url(&state.config().whatsapp_number, owner_name);

    MessageService::new(state.store())
        .add(&contact.into_new_message())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            whatsapp_url,
        }),
    ))
}
