use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lambda_http::tracing::{error, warn};
use serde::Serialize;

use shared::datastore::DatastoreError;
use shared::repositories::errors::repository_errors::RepositoryError;
use shared::services::errors::{
    article_service_errors::ArticleServiceError, auth_service_errors::AuthServiceError,
    token_errors::TokenError,
};

pub const ADMIN_ACCESS_REQUIRED: &str = "Admin access required";
pub const DUPLICATE_VALUE: &str = "Duplicate value entered for unique field";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Every failure a handler or the route wrapper can produce.
///
/// The first four variants are the datastore-facing kinds; the rest are raised
/// by handlers and the admin gate directly.
#[derive(Debug)]
pub enum ApiError {
    CastMismatch { field: String, value: String },
    ValidationFailure { errors: Vec<String> },
    DuplicateKey,
    Unknown { message: Option<String> },
    NotFound(String),
    Unauthorized(String),
    AdminAccessRequired,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ApiError {
    pub fn unknown(message: impl Into<String>) -> Self {
        ApiError::Unknown {
            message: Some(message.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::CastMismatch { .. } | ApiError::ValidationFailure { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::DuplicateKey => StatusCode::CONFLICT,
            ApiError::Unknown { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::AdminAccessRequired => StatusCode::FORBIDDEN,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let (message, errors) = match self {
            ApiError::CastMismatch { field, value } => (format!("Invalid {field}: {value}"), None),
            ApiError::ValidationFailure { errors } => {
                ("Validation Error".to_string(), Some(errors.clone()))
            }
            ApiError::DuplicateKey => (DUPLICATE_VALUE.to_string(), None),
            ApiError::Unknown { message } => (
                message
                    .as_deref()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(INTERNAL_SERVER_ERROR)
                    .to_string(),
                None,
            ),
            ApiError::NotFound(message) | ApiError::Unauthorized(message) => {
                (message.clone(), None)
            }
            ApiError::AdminAccessRequired => (ADMIN_ACCESS_REQUIRED.to_string(), None),
        };
        ErrorBody { message, errors }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::InvalidKey { field, value } => ApiError::CastMismatch { field, value },
            RepositoryError::Validation(errors) => ApiError::ValidationFailure { errors },
            RepositoryError::DuplicateKey => ApiError::DuplicateKey,
            RepositoryError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            // Driver detail stays in the logs.
            err @ (RepositoryError::Serialization(_) | RepositoryError::DynamoDb(_)) => {
                error!("Datastore failure: {}", err);
                ApiError::Unknown { message: None }
            }
        }
    }
}

impl From<DatastoreError> for ApiError {
    fn from(error: DatastoreError) -> Self {
        error!("{}", error);
        ApiError::unknown("Database connection failed")
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError::unknown(error.to_string())
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        match error {
            AuthServiceError::Validation(errors) => ApiError::ValidationFailure { errors },
            AuthServiceError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthServiceError::AccountExists(_) => ApiError::DuplicateKey,
            AuthServiceError::Token(e) => ApiError::from(e),
            AuthServiceError::Repository(e) => ApiError::from(e),
            AuthServiceError::PasswordHash(e) => {
                error!("Password hash failure: {}", e);
                ApiError::Unknown { message: None }
            }
        }
    }
}

impl From<ArticleServiceError> for ApiError {
    fn from(error: ArticleServiceError) -> Self {
        match error {
            ArticleServiceError::InvalidField { field, value } => {
                ApiError::CastMismatch { field, value }
            }
            ArticleServiceError::Validation(errors) => ApiError::ValidationFailure { errors },
            ArticleServiceError::NotFound => ApiError::NotFound("Article not found".to_string()),
            ArticleServiceError::Repository(e) => ApiError::from(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ValidationFailure {
            errors: vec![rejection.body_text()],
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::ValidationFailure {
            errors: vec![rejection.body_text()],
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::ValidationFailure {
            errors: vec![rejection.body_text()],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();

        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", body.message);
        } else {
            warn!(status = status.as_u16(), "{}", body.message);
        }

        (status, Json(body)).into_response()
    }
}
