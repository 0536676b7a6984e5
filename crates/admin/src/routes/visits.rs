//! Page view log routes.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::{ClientIp, RequireRead};
use crate::models::{NewSiteVisit, SiteVisit};
use crate::services::VisitService;
use crate::state::AppState;

/// Query string for the visit list.
#[derive(Debug, Default, Deserialize)]
pub struct RecentVisitsQuery {
    pub limit: Option<u32>,
}

/// Page view reported by the public site.
#[derive(Debug, Deserialize)]
pub struct RecordVisitRequest {
    pub page_url: String,
    #[serde(default)]
    pub referrer: Option<String>,
}

/// GET /api/visits?limit=
///
/// # Errors
///
/// Returns 500 if the visit log cannot be read.
pub async fn index(
    _auth: RequireRead,
    State(state): State<AppState>,
    Query(query): Query<RecentVisitsQuery>,
) -> Result<Json<Vec<SiteVisit>>, AppError> {
    let visits = VisitService::new(state.store()).recent(query.limit).await?;
    Ok(Json(visits))
}

/// POST /api/visits
///
/// IP address and user agent come from the request, not the body.
///
/// # Errors
///
/// Returns 400 for a blank page URL.
pub async fn record(
    State(state): State<AppState>,
    ClientIp(ip_address): ClientIp,
    headers: HeaderMap,
    Json(body): Json<RecordVisitRequest>,
) -> Result<StatusCode, AppError> {
    let page_url = body.page_url.trim();
    if page_url.is_empty() {
        return Err(AppError::BadRequest("page_url is required".to_string()));
    }

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let visit = NewSiteVisit {
        ip_address,
        page_url: page_url.to_owned(),
        user_agent,
        referrer: body.referrer.filter(|r| !r.trim().is_empty()),
    };

    VisitService::new(state.store()).record(&visit).await?;
    Ok(StatusCode::CREATED)
}
