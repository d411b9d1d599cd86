pub mod config;
pub mod datastore;
pub mod models;
pub mod repositories;
pub mod services;
