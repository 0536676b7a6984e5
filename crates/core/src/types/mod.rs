//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod id;
pub mod permission;
pub mod status;

pub use contact::{ContactFieldError, Email, PhoneNumber};
pub use id::*;
pub use permission::Permissions;
pub use status::{MessageStatus, ParseMessageStatusError};
