//! Session token derivation.
//!
//! The token stored next to a persisted session is the hex HMAC-SHA256 of the
//! session JSON under the server's session secret. A session whose token does
//! not verify is ignored on rehydration, so editing the stored JSON (for
//! example to add a permission) does not grant anything.

use core::fmt;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Keyed signer for persisted sessions.
#[derive(Clone)]
pub struct SessionKey {
    mac: HmacSha256,
}

impl SessionKey {
    /// Build a signer from the configured session secret.
    ///
    /// # Errors
    ///
    /// Returns `hmac::digest::InvalidLength` if the key is rejected. HMAC
    /// accepts keys of any length, so this only happens for a broken build.
    pub fn new(secret: &SecretString) -> Result<Self, hmac::digest::InvalidLength> {
        let mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())?;
        Ok(Self { mac })
    }

    /// Derive the token for a serialized session.
    #[must_use]
    pub fn token_for(&self, session_json: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(session_json.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Check a token in constant time.
    #[must_use]
    pub fn verify(&self, session_json: &str, token: &str) -> bool {
        let Ok(expected) = hex::decode(token) else {
            return false;
        };
        let mut mac = self.mac.clone();
        mac.update(session_json.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKey").finish_non_exhaustive()
    }
}
