//! Authentication extractors for dashboard routes.
//!
//! Each extractor builds a [`SessionManager`] over the request's cookie
//! session and rejects with 401 when no valid session exists. The permission
//! extractors additionally reject with 403.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use vitrine_core::permission;

use crate::db::PgStore;
use crate::error::{AppError, set_sentry_user};
use crate::models::CurrentAdmin;
use crate::services::SessionManager;
use crate::state::AppState;

/// Session manager bound to one request.
type RequestSession<'a> = SessionManager<'a, PgStore, Session>;

fn request_session<'a>(
    parts: &Parts,
    state: &'a AppState,
) -> Result<RequestSession<'a>, AppError> {
    let session = parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

    Ok(SessionManager::new(
        state.store(),
        session,
        state.session_key(),
    ))
}

/// Extractor that requires a logged-in operator.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Olá, {}!", admin.username)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

impl FromRequestParts<AppState> for RequireAdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let mut manager = request_session(parts, state)?;

        let admin = manager
            .current_user()
            .await
            .ok_or_else(|| AppError::Unauthorized("not logged in".to_string()))?;

        set_sentry_user(&admin.id.to_string(), &admin.username);
        Ok(Self(admin))
    }
}

/// Extractor that requires the `read` permission.
pub struct RequireRead(pub CurrentAdmin);

impl FromRequestParts<AppState> for RequireRead {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_permission(parts, state, permission::READ)
            .await
            .map(Self)
    }
}

/// Extractor that requires the `write` permission.
pub struct RequireWrite(pub CurrentAdmin);

impl FromRequestParts<AppState> for RequireWrite {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_permission(parts, state, permission::WRITE)
            .await
            .map(Self)
    }
}

async fn require_permission(
    parts: &mut Parts,
    state: &AppState,
    name: &str,
) -> Result<CurrentAdmin, AppError> {
    let RequireAdminAuth(admin) = RequireAdminAuth::from_request_parts(parts, state).await?;

    if !admin.has_permission(name) {
        tracing::info!(admin_user_id = %admin.id, permission = name, "Permission denied");
        return Err(AppError::Forbidden(format!("missing '{name}' permission")));
    }
    Ok(admin)
}
