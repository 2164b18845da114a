//! Salted one-way password hashing.
//!
//! Hashes are argon2id PHC strings; verification re-derives the hash from
//! the stored salt, so a plaintext never compares equal to its hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use thiserror::Error;

/// Errors from hashing or verifying a password.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(String),
    #[error("Stored password hash is malformed: {0}")]
    Malformed(String),
}

/// Hashes a password with a freshly generated random salt.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verifies a password against a stored PHC hash string.
///
/// Returns `Ok(false)` on a mismatch; `Err` only when the stored hash
/// itself cannot be parsed.
pub fn verify(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|e| PasswordError::Malformed(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hashed = hash("hunter2").unwrap();

        assert!(verify("hunter2", &hashed).unwrap());
        assert!(!verify("hunter3", &hashed).unwrap());
    }

    #[test]
    fn hash_is_salted_and_one_way() {
        let a = hash("hunter2").unwrap();
        let b = hash("hunter2").unwrap();

        // Random salt: same password, different hashes.
        assert_ne!(a, b);
        // The hash is not the plaintext.
        assert_ne!(a, "hunter2");
        assert!(a.starts_with("$argon2"));
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify("hunter2", "not-a-phc-string").is_err());
    }
}
