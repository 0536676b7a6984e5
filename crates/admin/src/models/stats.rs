//! Aggregate statistics shapes returned to the dashboard.

use chrono::{DateTime, Months, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use vitrine_core::MessageStatus;

/// Headline counters for the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_visits: u64,
    pub visits_today: u64,
    pub total_messages: u64,
    pub pending_messages: u64,
}

/// Visits recorded on one UTC calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitStats {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub visits: u64,
}

/// Number of messages currently in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageStats {
    pub status: MessageStatus,
    pub count: u64,
}

/// Look-back window for the visits chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    /// Last 7 days.
    Day,
    /// Last 4 weeks.
    #[default]
    Week,
    /// Last 6 months.
    Month,
}

impl StatsPeriod {
    /// Earliest timestamp included in the window ending at `now`.
    #[must_use]
    pub fn lower_bound(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Day => now - TimeDelta::days(7),
            Self::Week => now - TimeDelta::weeks(4),
            // Only fails before year -262143; clamp rather than panic.
            Self::Month => now
                .checked_sub_months(Months::new(6))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        }
    }
}
