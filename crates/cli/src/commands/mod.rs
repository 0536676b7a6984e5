//! Subcommand implementations.

pub mod admin;
pub mod migrate;

use secrecy::SecretString;

/// Environment variable holding the database URL.
pub const DATABASE_URL_VAR: &str = "VITRINE_DATABASE_URL";

/// Database URL from `VITRINE_DATABASE_URL`, falling back to `DATABASE_URL`.
///
/// Loads `.env` first if present.
#[must_use]
pub fn database_url() -> Option<SecretString> {
    dotenvy::dotenv().ok();

    std::env::var(DATABASE_URL_VAR)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}
