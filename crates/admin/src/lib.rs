//! Vitrine dashboard library.
//!
//! This crate provides the dashboard API as a library, allowing it to be
//! tested and reused.
//!
//! # Layers
//!
//! - [`db`] - Store traits and their `PostgreSQL` implementation
//! - [`services`] - Session manager, statistics, messages, visits, contact, settings
//! - [`routes`] / [`middleware`] - axum JSON API
//!
//! # Security
//!
//! Operator accounts authenticate with Argon2 password hashes only. Persisted
//! sessions carry an HMAC token keyed by `VITRINE_SESSION_SECRET`, so a
//! session edited in storage is ignored.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
