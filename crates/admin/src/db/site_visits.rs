//! Site visit queries for `PostgreSQL`.

use chrono::{DateTime, Utc};

use vitrine_core::SiteVisitId;

use super::{PgStore, RepositoryError, VisitStore, count_to_u64};
use crate::models::{NewSiteVisit, SiteVisit};

/// Internal row type for `PostgreSQL` site visit queries.
#[derive(Debug, sqlx::FromRow)]
struct SiteVisitRow {
    id: SiteVisitId,
    ip_address: String,
    page_url: String,
    user_agent: Option<String>,
    referrer: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SiteVisitRow> for SiteVisit {
    fn from(row: SiteVisitRow) -> Self {
        Self {
            id: row.id,
            ip_address: row.ip_address,
            page_url: row.page_url,
            user_agent: row.user_agent,
            referrer: row.referrer,
            created_at: row.created_at,
        }
    }
}

impl VisitStore for PgStore {
    async fn count_visits(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM site_visits")
            .fetch_one(self.pool())
            .await?;
        count_to_u64(count)
    }

    async fn count_visits_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM site_visits WHERE created_at >= $1 AND created_at <= $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(self.pool())
        .await?;
        count_to_u64(count)
    }

    async fn visit_timestamps_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, RepositoryError> {
        let timestamps = sqlx::query_scalar(
            "SELECT created_at FROM site_visits WHERE created_at >= $1 ORDER BY created_at ASC",
        )
        .bind(since)
        .fetch_all(self.pool())
        .await?;
        Ok(timestamps)
    }

    async fn recent_visits(&self, limit: u32) -> Result<Vec<SiteVisit>, RepositoryError> {
        let rows = sqlx::query_as::<_, SiteVisitRow>(
            r"
            SELECT id, ip_address, page_url, user_agent, referrer, created_at
            FROM site_visits
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_visit(
        &self,
        visit: &NewSiteVisit,
        at: DateTime<Utc>,
    ) -> Result<SiteVisit, RepositoryError> {
        let row = sqlx::query_as::<_, SiteVisitRow>(
            r"
            INSERT INTO site_visits (id, ip_address, page_url, user_agent, referrer, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, ip_address, page_url, user_agent, referrer, created_at
            ",
        )
        .bind(SiteVisitId::new())
        .bind(&visit.ip_address)
        .bind(&visit.page_url)
        .bind(visit.user_agent.as_deref())
        .bind(visit.referrer.as_deref())
        .bind(at)
        .fetch_one(self.pool())
        .await?;

        Ok(row.into())
    }
}
