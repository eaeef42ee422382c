//! Password hashing
//!
//! Account passwords are stored as Argon2id PHC strings
//! (`$argon2id$v=19$...`) with a random per-password salt.

use crate::error::{AppError, Result};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

/// Hash a password for storage
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Generic(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a password against a stored hash.
///
/// A malformed stored hash is an error; a wrong password is `Ok(false)`.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Generic(format!("Invalid stored password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
