//! Business logic services for the dashboard.
//!
//! # Services
//!
//! - `auth` - Operator login, persisted sessions and permission checks
//! - `contact` - Public contact form hand-off to WhatsApp
//! - `messages` - Contact message listing, filtering and triage
//! - `settings` - Typed settings sections
//! - `stats` - Dashboard counters and chart series
//! - `visits` - Page view log

pub mod auth;
pub mod contact;
pub mod messages;
pub mod settings;
pub mod stats;
pub mod visits;

pub use auth::{AuthError, SessionKey, SessionManager, SessionStorage, StorageError};
pub use contact::{ContactError, ContactSubmission, ValidContact};
pub use messages::{MessageService, filter_messages};
pub use settings::SettingsService;
pub use stats::{StatsService, bucket_visits_by_day, count_by_status};
pub use visits::VisitService;
