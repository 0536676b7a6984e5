//! Operator login, logout and password routes.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user};
use crate::middleware::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::services::SessionManager;
use crate::state::AppState;

/// Login form.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Password change form.
#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// POST /api/auth/login
///
/// # Errors
///
/// Returns 401 for an unknown username or wrong password.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginRequest>,
) -> Result<Json<CurrentAdmin>, AppError> {
    let mut manager = SessionManager::new(state.store(), session.clone(), state.session_key());
    let admin = manager.login(form.username.trim(), &form.password).await?;

    // New session ID on privilege change
    if let Err(e) = session.cycle_id().await {
        tracing::warn!(error = %e, "Failed to cycle session ID after login");
    }

    Ok(Json(admin))
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, session: Session) -> StatusCode {
    let mut manager = SessionManager::new(state.store(), session, state.session_key());
    manager.logout().await;
    clear_sentry_user();
    StatusCode::NO_CONTENT
}

/// GET /api/auth/me
pub async fn me(RequireAdminAuth(admin): RequireAdminAuth) -> Json<CurrentAdmin> {
    Json(admin)
}

/// POST /api/auth/password
///
/// # Errors
///
/// Returns 400 if the new password is rejected and 401 if the current one is wrong.
#[instrument(skip_all)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    let mut manager = SessionManager::new(state.store(), session, state.session_key());
    manager
        .change_password(
            &form.current_password,
            &form.new_password,
            &form.confirm_password,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
