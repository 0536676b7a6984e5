//! Site visit log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitrine_core::SiteVisitId;

/// One recorded page view. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteVisit {
    pub id: SiteVisitId,
    pub ip_address: String,
    pub page_url: String,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A page view to record. ID and timestamp are assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSiteVisit {
    pub ip_address: String,
    pub page_url: String,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub referrer: Option<String>,
}
