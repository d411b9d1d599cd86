use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Datastore failures, already classified into the kinds the API layer maps.
#[derive(Debug, Error, PartialEq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,
    #[error("Invalid {field}: {value}")]
    InvalidKey { field: String, value: String },
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Duplicate value for unique field")]
    DuplicateKey,
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("DynamoDB error: {0}")]
    DynamoDb(String),
}

impl RepositoryError {
    /// Classify a DynamoDB SDK error by its service error code.
    pub fn from_sdk<E, R>(err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata,
    {
        let message = err.message().map(str::to_string);
        Self::classify(err.code(), message.or_else(|| Some(err.to_string())))
    }

    pub fn classify(code: Option<&str>, message: Option<String>) -> Self {
        let message = message.unwrap_or_default();
        match code {
            Some("ConditionalCheckFailedException") => RepositoryError::DuplicateKey,
            Some("TransactionCanceledException") if message.contains("ConditionalCheckFailed") => {
                RepositoryError::DuplicateKey
            }
            Some("ValidationException") => RepositoryError::Validation(vec![message]),
            Some(code) => RepositoryError::DynamoDb(format!("{code}: {message}")),
            None => RepositoryError::DynamoDb(message),
        }
    }
}

impl From<serde_dynamo::Error> for RepositoryError {
    fn from(error: serde_dynamo::Error) -> Self {
        RepositoryError::Serialization(error.to_string())
    }
}
