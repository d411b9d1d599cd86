use std::sync::Arc;
use tracing::{debug, info};

use crate::models::admin::AdminUser;
use crate::models::auth::claims::{IdentityClaims, Role};
use crate::models::auth::requests::LoginRequest;
use crate::repositories::admin_repository::AdminRepository;
use crate::repositories::errors::repository_errors::RepositoryError;
use crate::services::errors::auth_service_errors::AuthServiceError;
use crate::services::password::{hash_password, verify_against_placeholder, verify_password};
use crate::services::token_service::TokenService;

/// A successful login: the identity and the token to store in the session cookie.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub identity: IdentityClaims,
    pub token: String,
}

pub struct AuthService {
    repository: Arc<dyn AdminRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(repository: Arc<dyn AdminRepository>, tokens: Arc<TokenService>) -> Self {
        AuthService { repository, tokens }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<IssuedSession, AuthServiceError> {
        let errors = request.validation_errors();
        if !errors.is_empty() {
            return Err(AuthServiceError::Validation(errors));
        }

        let admin = match self.repository.get_admin_by_email(&request.email).await {
            Ok(admin) => admin,
            Err(RepositoryError::NotFound) => {
                // Unknown emails still pay for one hash.
                verify_against_placeholder(&request.password);
                debug!("Login rejected: unknown email");
                return Err(AuthServiceError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        if !verify_password(&request.password, &admin.password_hash)? {
            debug!(admin_id = %admin.id, "Login rejected: wrong password");
            return Err(AuthServiceError::InvalidCredentials);
        }

        let identity = admin.identity();
        let token = self.tokens.issue(&identity)?;
        info!(admin_id = %identity.id, role = %identity.role, "Admin logged in");

        Ok(IssuedSession { identity, token })
    }

    pub async fn create_admin(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<AdminUser, AuthServiceError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let errors = request.validation_errors();
        if !errors.is_empty() {
            return Err(AuthServiceError::Validation(errors));
        }

        if self.repository.email_exists(email).await? {
            return Err(AuthServiceError::AccountExists(email.to_string()));
        }

        let admin = AdminUser::new(email.to_string(), hash_password(password)?, role);
        self.repository.create_admin(&admin).await?;
        info!(admin_id = %admin.id, role = %admin.role, "Admin account created");
        Ok(admin)
    }
}
