//! Stateless password hashing.
//!
//! Hashes are Argon2id PHC strings with a fresh random salt per call, so the
//! same password never produces the same stored value twice. Verification
//! reads the algorithm parameters back out of the stored string.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString,
};
use rand_core::OsRng;
use thiserror::Error;

/// Errors raised while hashing or checking a password.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// The hasher rejected the input or parameters.
    #[error("password hashing failed: {0}")]
    Hash(String),
    /// A stored hash could not be parsed as a PHC string.
    #[error("stored password hash is malformed: {0}")]
    Malformed(String),
}

/// Encoded password hash as persisted alongside a user.
///
/// `Debug` output is redacted so hashes never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash read from storage.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Hash a plaintext password with a random salt.
///
/// # Examples
/// ```
/// use todo_backend::domain::{hash_password, verify_password};
///
/// let hash = hash_password("secret1").unwrap();
/// assert!(verify_password("secret1", &hash).unwrap());
/// assert!(!verify_password("secret2", &hash).unwrap());
/// ```
pub fn hash_password(password: &str) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordHash(hash.to_string()))
        .map_err(|err| PasswordHashError::Hash(err.to_string()))
}

/// Check a plaintext password against a stored hash.
///
/// Returns `Ok(false)` on mismatch and an error only when the stored value
/// is unusable.
pub fn verify_password(password: &str, stored: &PasswordHash) -> Result<bool, PasswordHashError> {
    let parsed =
        PhcString::new(stored.as_str()).map_err(|err| PasswordHashError::Malformed(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::Hash(err.to_string())),
    }
}
