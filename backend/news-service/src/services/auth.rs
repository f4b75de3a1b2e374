/// Credential checks and Argon2id password hashing
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::UserAccount;

/// External identity provider consulted by the login endpoint
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// `Ok(None)` for unknown users, inactive accounts and wrong passwords
    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<UserAccount>>;
}

/// Hash a password with Argon2id and a random salt.
///
/// Returns a PHC-formatted string safe for storage.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against a PHC hash.
///
/// A mismatch is `Ok(false)`; a malformed stored hash is an internal error.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash format: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}
