pub mod article_service_errors;
pub mod auth_service_errors;
pub mod token_errors;
