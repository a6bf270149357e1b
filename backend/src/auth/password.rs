//! Password hashing and verification.
//!
//! Uses bcrypt with a fresh random salt per hash. bcrypt only reads the first
//! 72 bytes of its input, so longer passwords are refused instead of being
//! silently truncated.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{hash, verify};

/// Longest password bcrypt hashes without truncation.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password before storing it in the database.
    ///
    /// # Errors
    /// `ServiceError::Validation` if the password exceeds `MAX_PASSWORD_BYTES`,
    /// `ServiceError::InternalError` if bcrypt itself fails.
    pub fn hash(&self, password: &str) -> ServiceResult<String> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(ServiceError::validation(format!(
                "Password must be at most {} bytes.",
                MAX_PASSWORD_BYTES
            )));
        }

        hash(password, self.cost)
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns `false` for a malformed hash instead of an error.
    pub fn verify(&self, password: &str, password_hash: &str) -> bool {
        if password.len() > MAX_PASSWORD_BYTES {
            return false;
        }

        verify(password, password_hash).unwrap_or(false)
    }

    /// `hash` on the blocking pool.
    pub async fn hash_blocking(&self, password: String) -> ServiceResult<String> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ServiceError::internal_error(format!("Hashing task failed: {}", e)))?
    }

    /// `verify` on the blocking pool. A failed task counts as a mismatch.
    pub async fn verify_blocking(&self, password: String, password_hash: String) -> bool {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .unwrap_or(false)
    }
}
