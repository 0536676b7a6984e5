//! Contact message triage status.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not one of the three known statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid message status: {0:?}")]
pub struct ParseMessageStatusError(pub String);

/// Triage status of an inbound WhatsApp contact message.
///
/// The wire and database representation are the Portuguese labels shown to
/// the operator. No other value is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum MessageStatus {
    /// New message nobody has picked up yet.
    #[default]
    #[serde(rename = "Aguardando")]
    Aguardando,
    /// The operator is working on it.
    #[serde(rename = "Em preparo")]
    EmPreparo,
    /// Handled.
    #[serde(rename = "Finalizado")]
    Finalizado,
}

impl MessageStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Aguardando, Self::EmPreparo, Self::Finalizado];

    /// The stored label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aguardando => "Aguardando",
            Self::EmPreparo => "Em preparo",
            Self::Finalizado => "Finalizado",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageStatus {
    type Err = ParseMessageStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseMessageStatusError(s.to_owned()))
    }
}
