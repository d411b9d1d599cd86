pub mod article_service;
pub mod auth_service;
pub mod errors;
pub mod password;
pub mod token_service;
