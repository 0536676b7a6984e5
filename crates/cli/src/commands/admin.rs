//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create an operator with the default read/write permissions
//! VITRINE_ADMIN_PASSWORD='...' vitrine-cli admin create -u amanda -e amanda@exemplo.com.br
//!
//! # Create a read-only operator
//! VITRINE_ADMIN_PASSWORD='...' vitrine-cli admin create -u analista -e analista@exemplo.com.br -p read
//! ```
//!
//! # Environment Variables
//!
//! - `VITRINE_DATABASE_URL` - `PostgreSQL` connection string
//! - `VITRINE_ADMIN_PASSWORD` - Password for the new account (never taken as an argument)

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use vitrine_admin::db::{AdminUserStore, PgStore, RepositoryError, create_pool};
use vitrine_admin::models::NewAdminUser;
use vitrine_admin::services::AuthError;
use vitrine_admin::services::auth::{hash_password, validate_password};
use vitrine_core::{AdminUserId, ContactFieldError, Email, Permissions};

use super::{DATABASE_URL_VAR, database_url};

/// Environment variable holding the new account's password.
const PASSWORD_VAR: &str = "VITRINE_ADMIN_PASSWORD";

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Blank username.
    #[error("Username cannot be empty")]
    EmptyUsername,

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] ContactFieldError),

    /// Password rejected or could not be hashed.
    #[error("Password error: {0}")]
    Password(#[from] AuthError),

    /// User already exists.
    #[error("Admin user already exists: {0}")]
    UserExists(String),

    /// Store error other than a duplicate.
    #[error("Store error: {0}")]
    Store(RepositoryError),
}

/// Create a new admin user.
///
/// # Arguments
///
/// * `username` - Login name
/// * `email` - Contact address
/// * `permissions` - Granted permissions; empty grants the default read/write set at login
///
/// # Returns
///
/// The ID of the created admin user.
///
/// # Errors
///
/// Returns `AdminError` if input validation fails, the username is taken, or
/// the database is unreachable.
pub async fn create_user(
    username: &str,
    email: &str,
    permissions: &[String],
) -> Result<AdminUserId, AdminError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AdminError::EmptyUsername);
    }
    let email = Email::parse(email)?;

    let url = database_url().ok_or(AdminError::MissingEnvVar(DATABASE_URL_VAR))?;
    let password = std::env::var(PASSWORD_VAR)
        .map(SecretString::from)
        .map_err(|_| AdminError::MissingEnvVar(PASSWORD_VAR))?;

    validate_password(password.expose_secret())?;
    let password_hash = hash_password(password.expose_secret())?;

    tracing::info!("Connecting to database...");
    let store = PgStore::new(create_pool(&url).await?);

    let user = NewAdminUser {
        username: username.to_owned(),
        email,
        permissions: (!permissions.is_empty())
            .then(|| permissions.iter().cloned().collect::<Permissions>()),
        password_hash,
    };

    let created = store.create(&user).await.map_err(|e| match e {
        RepositoryError::Conflict(_) => AdminError::UserExists(username.to_owned()),
        other => AdminError::Store(other),
    })?;

    tracing::info!(
        admin_user_id = %created.id,
        username = %created.username,
        permissions = ?created.effective_permissions().to_vec(),
        "Admin user created"
    );

    Ok(created.id)
}
