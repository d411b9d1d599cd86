use thiserror::Error;

use crate::repositories::errors::repository_errors::RepositoryError;
use crate::services::errors::token_errors::TokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account already exists: {0}")]
    AccountExists(String),
    #[error("Password hashing error: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
