//! Password hashing for coach accounts.
//!
//! Passwords are stored as an iterated, salted SHA-256 digest. Both the
//! digest and the salt are base64 encoded.

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;

pub const HASH_ITERATIONS: u32 = 10_000;
pub const SALT_LENGTH: usize = 16;
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("not logged in, run `minkamp login` first")]
    NotLoggedIn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash {
    pub hash: String,
    pub salt: String,
}

pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

pub fn hash_with_salt(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    let mut digest = hasher.finalize();

    for _ in 1..HASH_ITERATIONS {
        let mut hasher = Sha256::new();
        hasher.update(digest.as_slice());
        hasher.update(password.as_bytes());
        digest = hasher.finalize();
    }

    STANDARD.encode(digest)
}

pub fn validate_credentials(username: &str, password: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() {
        return Err(AuthError::EmptyUsername);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }
    Ok(())
}

pub fn hash_password(password: &str) -> PasswordHash {
    let salt = generate_salt();
    let hash = hash_with_salt(password, &salt);
    PasswordHash { hash, salt }
}

pub fn verify_password(password: &str, stored: &PasswordHash) -> bool {
    let candidate = hash_with_salt(password, &stored.salt);
    constant_time_eq(candidate.as_bytes(), stored.hash.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
