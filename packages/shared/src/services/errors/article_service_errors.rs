use thiserror::Error;

use crate::repositories::errors::repository_errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ArticleServiceError {
    #[error("Invalid {field}: {value}")]
    InvalidField { field: String, value: String },
    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Article not found")]
    NotFound,
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ArticleServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => ArticleServiceError::NotFound,
            other => ArticleServiceError::Repository(other),
        }
    }
}
