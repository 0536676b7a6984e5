//! Vitrine Core - Shared types library.
//!
//! This crate provides the domain types used across the Vitrine components:
//! - `admin` - Dashboard API, session manager, and statistics services
//! - `cli` - Command-line tools for migrations and account seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP handling. Database encoding for IDs and statuses is gated behind
//! the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, contact fields, message status, permissions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
