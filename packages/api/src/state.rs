use std::sync::Arc;

use shared::config::Config;
use shared::datastore::Datastore;
use shared::services::token_service::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub datastore: Arc<Datastore>,
    /// Adds the `Secure` attribute to the session cookie.
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(config: &Config, datastore: Arc<Datastore>) -> Self {
        AppState {
            tokens: Arc::new(TokenService::new(config.jwt_secret.clone())),
            datastore,
            secure_cookies: config.is_production(),
        }
    }
}
