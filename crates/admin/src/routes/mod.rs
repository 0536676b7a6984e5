//! HTTP route handlers for the dashboard API.
//!
//! # Route Structure
//!
//! ```text
//! GET   /health                     - Liveness
//! GET   /health/ready               - Database reachable
//!
//! # Auth
//! POST  /api/auth/login             - Log in (username + password)
//! POST  /api/auth/logout            - Log out
//! GET   /api/auth/me                - Current operator
//! POST  /api/auth/password          - Change password
//!
//! # Statistics (read)
//! GET   /api/stats/dashboard        - Headline counters
//! GET   /api/stats/visits           - Visits per day (?period=day|week|month)
//! GET   /api/stats/messages         - Messages per status
//!
//! # Messages
//! GET   /api/messages               - Message table (?status=&search=)   [read]
//! PATCH /api/messages/{id}/status   - Move a message to a status         [write]
//!
//! # Visits
//! GET   /api/visits                 - Recent page views (?limit=)        [read]
//! POST  /api/visits                 - Record a page view (public)
//!
//! # Contact
//! POST  /api/contact                - Contact form hand-off (public)
//!
//! # Settings
//! GET   /api/settings               - All sections                       [read]
//! PUT   /api/settings               - Replace one section                [write]
//! ```

pub mod auth;
pub mod contact;
pub mod health;
pub mod messages;
pub mod settings;
pub mod stats;
pub mod visits;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/password", post(auth::change_password))
}

/// Create the statistics routes router.
pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(stats::dashboard))
        .route("/visits", get(stats::visits))
        .route("/messages", get(stats::messages))
}

/// Create the message routes router.
pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(messages::index))
        .route("/{id}/status", patch(messages::update_status))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest("/stats", stats_routes())
        .nest("/messages", message_routes())
        .route("/visits", get(visits::index).post(visits::record))
        .route("/contact", post(contact::submit))
        .route("/settings", get(settings::show).put(settings::update));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api)
}

