//! Password hashing with Argon2id.
//!
//! Hashes are stored in PHC string format, so parameters and salt travel with
//! the hash and verification needs no extra state.

use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher, SaltString},
};
use thiserror::Error;

const SALT_LENGTH_BYTES: usize = 16;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),

    #[error("Failed to parse password hash: {0}")]
    InvalidHash(String),
}

pub type Result<T> = std::result::Result<T, PasswordError>;

/// Hashes a password with Argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns [`PasswordError::HashingFailed`] if the system RNG is unavailable
/// or hashing fails.
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; SALT_LENGTH_BYTES];
    getrandom::fill(&mut salt_bytes).map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
        .to_string();

    Ok(phc)
}

/// Checks a password against a stored PHC hash.
///
/// # Errors
///
/// Returns [`PasswordError::InvalidHash`] if `pw_hash` is not a valid PHC string.
pub fn verify_password(password: &str, pw_hash: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(pw_hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
