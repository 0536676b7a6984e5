//! Site visit log.

use chrono::Utc;
use tracing::instrument;

use crate::db::{RepositoryError, VisitStore};
use crate::models::{NewSiteVisit, SiteVisit};

/// Default number of visits returned by [`VisitService::recent`].
pub const DEFAULT_RECENT_LIMIT: u32 = 100;

/// Upper bound on [`VisitService::recent`].
pub const MAX_RECENT_LIMIT: u32 = 1000;

/// Record and list page views.
pub struct VisitService<'a, V> {
    store: &'a V,
}

impl<'a, V: VisitStore> VisitService<'a, V> {
    #[must_use]
    pub const fn new(store: &'a V) -> Self {
        Self { store }
    }

    /// Most recent visits first. `limit` defaults to 100 and is clamped to 1..=1000.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the log cannot be read.
    #[instrument(skip(self))]
    pub async fn recent(&self, limit: Option<u32>) -> Result<Vec<SiteVisit>, RepositoryError> {
        self.store.recent_visits(clamp_limit(limit)).await
    }

    /// Append a page view stamped now.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert fails.
    #[instrument(skip(self, visit), fields(page_url = %visit.page_url))]
    pub async fn record(&self, visit: &NewSiteVisit) -> Result<SiteVisit, RepositoryError> {
        let stored = self.store.insert_visit(visit, Utc::now()).await?;
        tracing::debug!(visit_id = %stored.id, "Visit recorded");
        Ok(stored)
    }
}

fn clamp_limit(limit: Option<u32>) -> u32 {
    limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT)
}
