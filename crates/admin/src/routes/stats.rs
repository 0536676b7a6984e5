//! Dashboard statistics routes.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::RequireRead;
use crate::models::{DashboardStats, MessageStats, StatsPeriod, VisitStats};
use crate::services::StatsService;
use crate::state::AppState;

/// Query string for the visits chart.
#[derive(Debug, Default, Deserialize)]
pub struct VisitStatsQuery {
    #[serde(default)]
    pub period: StatsPeriod,
}

/// GET /api/stats/dashboard
pub async fn dashboard(
    _auth: RequireRead,
    State(state): State<AppState>,
) -> Json<DashboardStats> {
    let stats = StatsService::new(state.store(), state.store());
    Json(stats.dashboard_stats().await)
}

/// GET /api/stats/visits?period=day|week|month
///
/// # Errors
///
/// Returns 500 if the visit log cannot be read.
pub async fn visits(
    _auth: RequireRead,
    State(state): State<AppState>,
    Query(query): Query<VisitStatsQuery>,
) -> Result<Json<Vec<VisitStats>>, AppError> {
    let stats = StatsService::new(state.store(), state.store());
    Ok(Json(stats.visit_stats(query.period).await?))
}

/// GET /api/stats/messages
///
/// # Errors
///
/// Returns 500 if the message log cannot be read.
pub async fn messages(
    _auth: RequireRead,
    State(state): State<AppState>,
) -> Result<Json<Vec<MessageStats>>, AppError> {
    let stats = StatsService::new(state.store(), state.store());
    Ok(Json(stats.message_stats().await?))
}
