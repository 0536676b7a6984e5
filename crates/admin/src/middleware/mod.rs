//! HTTP middleware and extractors for the dashboard API.

pub mod auth;
pub mod client_ip;
pub mod session;

pub use auth::{RequireAdminAuth, RequireRead, RequireWrite};
pub use client_ip::ClientIp;
pub use session::create_session_layer;
