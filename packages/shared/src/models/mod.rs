pub mod admin;
pub mod article;
pub mod auth;
pub mod pagination;
