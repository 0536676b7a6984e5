//! Dashboard settings routes.

use axum::{Json, extract::State};

use crate::error::AppError;
use crate::middleware::{RequireRead, RequireWrite};
use crate::models::{SettingsUpdate, SiteSettings};
use crate::services::SettingsService;
use crate::state::AppState;

/// GET /api/settings
///
/// # Errors
///
/// Returns 500 if the settings cannot be read.
pub async fn show(
    _auth: RequireRead,
    State(state): State<AppState>,
) -> Result<Json<SiteSettings>, AppError> {
    Ok(Json(SettingsService::new(state.store()).load().await?))
}

/// PUT /api/settings
///
/// Body: `{"section": "general", "values": {...}}`. Returns the full settings
/// after the write.
///
/// # Errors
///
/// Returns 500 if the settings cannot be written.
pub async fn update(
    _auth: RequireWrite,
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<SiteSettings>, AppError> {
    let service = SettingsService::new(state.store());
    service.save_section(&update).await?;
    Ok(Json(service.load().await?))
}
