//! Argon2id password hashing and verification.

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use eduhub_core::error::AppError;

/// Hash verified when the login email matches no principal, so that path
/// costs the same as a wrong password. Built with the same parameters as
/// real hashes.
static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH
        .get_or_init(|| {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(b"eduhub-placeholder-credential", &salt)
                .ok()
                .map(|hash| hash.to_string())
        })
        .as_deref()
}

#[cfg(test)]
pub(crate) fn dummy_hash_built() -> bool {
    DUMMY_HASH.get().is_some()
}

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// The tag comparison inside `argon2` is constant-time.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Builds the placeholder hash now rather than on the first unknown-email
    /// login. Returns whether it is available.
    pub fn prepare_dummy(&self) -> bool {
        dummy_hash().is_some()
    }

    /// Verifies against `hash` when present, otherwise burns the same work
    /// on a placeholder hash and reports a mismatch.
    pub fn verify_or_dummy(&self, password: &str, hash: Option<&str>) -> Result<bool, AppError> {
        match hash {
            Some(hash) => self.verify_password(password, hash),
            None => {
                if let Some(dummy) = dummy_hash() {
                    let _ = self.verify_password(password, dummy);
                }
                Ok(false)
            }
        }
    }
}
