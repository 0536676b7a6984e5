//! Argon2 password hashing.
//!
//! Verification has a single path: the stored PHC string is parsed and
//! checked with Argon2. There are no literal or fallback credentials.

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::AuthError;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate that a new password meets requirements.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is too short or blank.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if password.trim().is_empty() {
        return Err(AuthError::WeakPassword(
            "password cannot be only whitespace".to_string(),
        ));
    }
    Ok(())
}

/// Hash a password using Argon2id with a random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored PHC hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidPassword` on mismatch or if the stored hash
/// cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidPassword)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidPassword)
}

/// Hash checked when a username has no account, so that lookup costs the
/// same Argon2 work as a wrong password.
fn unknown_user_hash() -> Option<&'static str> {
    static HASH: OnceLock<Option<String>> = OnceLock::new();
    HASH.get_or_init(|| hash_password("vitrine-unknown-user").ok())
        .as_deref()
}

/// Spend one password verification and report an unknown user.
pub(super) fn reject_unknown_user(password: &str) -> AuthError {
    if let Some(hash) = unknown_user_hash() {
        // Always a mismatch; only the cost matters
        let _ = verify_password(password, hash);
    }
    AuthError::UserNotFound
}
