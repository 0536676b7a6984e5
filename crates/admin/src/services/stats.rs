//! Dashboard statistics over the visit and message logs.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use tracing::instrument;

use vitrine_core::MessageStatus;

use crate::db::{MessageStore, RepositoryError, VisitStore};
use crate::models::{DashboardStats, MessageStats, StatsPeriod, VisitStats};

/// Aggregates counts for the dashboard cards and charts.
pub struct StatsService<'a, V, M> {
    visits: &'a V,
    messages: &'a M,
}

impl<'a, V: VisitStore, M: MessageStore> StatsService<'a, V, M> {
    /// Create a stats service over the two logs.
    #[must_use]
    pub const fn new(visits: &'a V, messages: &'a M) -> Self {
        Self { visits, messages }
    }

    /// Headline counters as of now.
    pub async fn dashboard_stats(&self) -> DashboardStats {
        self.dashboard_stats_at(Utc::now()).await
    }

    /// Headline counters with "today" taken from `now`'s UTC date.
    ///
    /// The four counts run concurrently. A count that fails is reported as 0
    /// so the dashboard still renders.
    #[instrument(skip(self))]
    pub async fn dashboard_stats_at(&self, now: DateTime<Utc>) -> DashboardStats {
        let (today_start, today_end) = utc_day_bounds(now);

        let (total_visits, visits_today, total_messages, pending_messages) = tokio::join!(
            self.visits.count_visits(),
            self.visits.count_visits_between(today_start, today_end),
            self.messages.count_messages(),
            self.messages
                .count_messages_with_status(MessageStatus::Aguardando),
        );

        DashboardStats {
            total_visits: or_zero("total_visits", total_visits),
            visits_today: or_zero("visits_today", visits_today),
            total_messages: or_zero("total_messages", total_messages),
            pending_messages: or_zero("pending_messages", pending_messages),
        }
    }

    /// Visits per UTC day over `period`, ending now.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the visit log cannot be read.
    pub async fn visit_stats(&self, period: StatsPeriod) -> Result<Vec<VisitStats>, RepositoryError> {
        self.visit_stats_at(period, Utc::now()).await
    }

    /// Visits per UTC day over `period`, ending at `now`.
    ///
    /// Days without visits are omitted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the visit log cannot be read.
    #[instrument(skip(self))]
    pub async fn visit_stats_at(
        &self,
        period: StatsPeriod,
        now: DateTime<Utc>,
    ) -> Result<Vec<VisitStats>, RepositoryError> {
        let since = period.lower_bound(now);
        let timestamps = self.visits.visit_timestamps_since(since).await?;
        Ok(bucket_visits_by_day(&timestamps))
    }

    /// Number of messages in each status that currently has any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the message log cannot be read.
    #[instrument(skip(self))]
    pub async fn message_stats(&self) -> Result<Vec<MessageStats>, RepositoryError> {
        let statuses = self.messages.message_statuses().await?;
        Ok(count_by_status(&statuses))
    }
}

/// First and last representable instant of `now`'s UTC calendar day.
fn utc_day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let end = start + TimeDelta::days(1) - TimeDelta::microseconds(1);
    (start, end)
}

fn or_zero(counter: &'static str, result: Result<u64, RepositoryError>) -> u64 {
    result.unwrap_or_else(|e| {
        tracing::warn!(counter, error = %e, "Dashboard count failed, reporting 0");
        0
    })
}

/// Group timestamps by UTC calendar date, ascending.
#[must_use]
pub fn bucket_visits_by_day(timestamps: &[DateTime<Utc>]) -> Vec<VisitStats> {
    let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for ts in timestamps {
        *days.entry(ts.date_naive()).or_default() += 1;
    }

    days.into_iter()
        .map(|(date, visits)| VisitStats { date, visits })
        .collect()
}

/// Count statuses, keeping the order in which each status first appears.
#[must_use]
pub fn count_by_status(statuses: &[MessageStatus]) -> Vec<MessageStats> {
    let mut counts: Vec<MessageStats> = Vec::with_capacity(MessageStatus::ALL.len());
    for &status in statuses {
        match counts.iter_mut().find(|c| c.status == status) {
            Some(entry) => entry.count += 1,
            None => counts.push(MessageStats { status, count: 1 }),
        }
    }
    counts
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_day_bounds_cover_whole_day() {
        let (start, end) = utc_day_bounds(ts(2024, 3, 10, 15, 30));
        assert_eq!(start, ts(2024, 3, 10, 0, 0));
        assert_eq!(end.date_naive(), start.date_naive());
        assert_eq!(end + TimeDelta::microseconds(1), ts(2024, 3, 11, 0, 0));
    }

    #[test]
    fn test_bucket_visits_by_day() {
        let stats = bucket_visits_by_day(&[
            ts(2024, 1, 1, 10, 0),
            ts(2024, 1, 1, 15, 0),
            ts(2024, 1, 2, 9, 0),
        ]);

        assert_eq!(
            stats,
            vec![
                VisitStats {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    visits: 2,
                },
                VisitStats {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    visits: 1,
                },
            ]
        );
    }

    #[test]
    fn test_bucket_sorts_and_skips_gaps() {
        let stats = bucket_visits_by_day(&[
            ts(2024, 1, 5, 0, 0),
            ts(2024, 1, 1, 23, 59),
            ts(2024, 1, 5, 23, 59),
        ]);
        let dates: Vec<_> = stats.iter().map(|s| s.date.to_string()).collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-05"]);
        assert_eq!(stats.iter().map(|s| s.visits).sum::<u64>(), 3);
    }

    #[test]
    fn test_bucket_empty() {
        assert!(bucket_visits_by_day(&[]).is_empty());
    }

    #[test]
    fn test_count_by_status() {
        let stats = count_by_status(&[
            MessageStatus::Aguardando,
            MessageStatus::Aguardando,
            MessageStatus::Finalizado,
        ]);
        assert_eq!(
            stats,
            vec![
                MessageStats {
                    status: MessageStatus::Aguardando,
                    count: 2,
                },
                MessageStats {
                    status: MessageStatus::Finalizado,
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_count_by_status_first_occurrence_order() {
        let stats = count_by_status(&[
            MessageStatus::Finalizado,
            MessageStatus::Aguardando,
            MessageStatus::Finalizado,
        ]);
        assert_eq!(stats[0].status, MessageStatus::Finalizado);
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[1].status, MessageStatus::Aguardando);
    }
}
