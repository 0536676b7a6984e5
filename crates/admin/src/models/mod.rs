//! Domain models for the Vitrine dashboard.
//!
//! These are the validated shapes the services and routes work with. Row
//! types for `PostgreSQL` live privately in [`crate::db`].

pub mod admin_user;
pub mod message;
pub mod session;
pub mod settings;
pub mod site_visit;
pub mod stats;

pub use admin_user::{AdminUser, NewAdminUser};
pub use message::{MessageFilter, NewWhatsAppMessage, WhatsAppMessage};
pub use session::{CurrentAdmin, keys as session_keys};
pub use settings::{
    GeneralSettings, NotificationSettings, ProfileSettings, SecuritySettings, SettingsSection,
    SettingsUpdate, SiteSettings,
};
pub use site_visit::{NewSiteVisit, SiteVisit};
pub use stats::{DashboardStats, MessageStats, StatsPeriod, VisitStats};
