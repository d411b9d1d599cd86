//! Argon2id password hashing for admin accounts.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use std::sync::OnceLock;

use crate::services::errors::auth_service_errors::AuthServiceError;

/// Hash in PHC format: `$argon2id$v=19$m=...,t=...,p=...$salt$hash`
pub fn hash_password(password: &str) -> Result<String, AuthServiceError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthServiceError::PasswordHash(e.to_string()))
}

/// `Ok(false)` for a wrong password; `Err` only when the stored hash is unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthServiceError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AuthServiceError::PasswordHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthServiceError::PasswordHash(e.to_string())),
    }
}

/// Run a full verification against a fixed hash and discard the outcome.
///
/// Used on the unknown-account path of login. Always returns `false`.
pub fn verify_against_placeholder(password: &str) -> bool {
    static PLACEHOLDER: OnceLock<Option<String>> = OnceLock::new();
    let hash = PLACEHOLDER.get_or_init(|| hash_password("placeholder-account-password").ok());

    match hash {
        Some(hash) => {
            let _ = verify_password(password, hash);
            false
        }
        None => false,
    }
}
