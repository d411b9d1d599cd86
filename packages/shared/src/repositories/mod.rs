pub mod admin_repository;
pub mod article_repository;
pub mod errors;
