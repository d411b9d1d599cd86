//! Signed session tokens.
//!
//! Tokens are HS256 JWTs carrying an [`IdentityClaims`] plus `iat`/`exp`,
//! valid for one day. Verification accepts HS256 only and never reports why a
//! token was rejected: callers see `None` for malformed, tampered, expired or
//! foreign-algorithm tokens alike.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::models::auth::claims::{IdentityClaims, TokenClaims};
use crate::services::errors::token_errors::TokenError;

pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Clone)]
pub struct TokenService {
    secret: Option<String>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl TokenService {
    /// An empty secret is treated the same as a missing one.
    pub fn new(secret: Option<String>) -> Self {
        TokenService {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self::new(Some(secret.into()))
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    pub fn issue(&self, identity: &IdentityClaims) -> Result<String, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(
        &self,
        identity: &IdentityClaims,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let secret = self.secret.as_deref().ok_or(TokenError::MissingSecret)?;
        let claims = TokenClaims::new(identity, now);

        encode(
            &Header::new(TOKEN_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Option<IdentityClaims> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<IdentityClaims> {
        let secret = self.secret.as_deref()?;
        if token.is_empty() {
            return None;
        }

        // Expiry is checked against `now` below, with no leeway.
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        match decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        ) {
            Ok(data) if data.claims.is_expired_at(now) => {
                debug!(subject = %data.claims.id, "Rejected expired token");
                None
            }
            Ok(data) => Some(data.claims.into()),
            Err(err) => {
                debug!(error = ?err.kind(), "Rejected token");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::claims::{Role, TOKEN_TTL_SECONDS};
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    const SECRET: &str = "test-secret-key";

    fn identity(role: Role) -> IdentityClaims {
        IdentityClaims {
            id: "65f1c0ffee".to_string(),
            email: "exec@rmitfintech.club".to_string(),
            role,
        }
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_token_generation_and_verification_roundtrip() {
        let service = TokenService::with_secret(SECRET);
        for role in [Role::Admin, Role::SuperAdmin] {
            let token = service.issue(&identity(role)).unwrap();
            assert_eq!(service.verify(&token), Some(identity(role)));
        }
    }

    #[test]
    fn test_token_valid_until_one_day_after_issue() {
        let service = TokenService::with_secret(SECRET);
        let token = service.issue_at(&identity(Role::Admin), issued_at()).unwrap();

        let almost = issued_at() + Duration::hours(23) + Duration::minutes(59);
        let past = issued_at() + Duration::hours(24) + Duration::minutes(1);
        assert!(service.verify_at(&token, almost).is_some());
        assert!(service.verify_at(&token, past).is_none());
        assert!(service
            .verify_at(&token, issued_at() + Duration::seconds(TOKEN_TTL_SECONDS))
            .is_none());
    }

    #[test]
    fn test_verify_token_invalid() {
        let service = TokenService::with_secret(SECRET);
        assert!(service.verify("invalid-token").is_none());
        assert!(service.verify("").is_none());
        assert!(service.verify("a.b.c").is_none());
    }

    #[test]
    fn test_different_secrets_reject_each_other() {
        let service1 = TokenService::with_secret("secret1");
        let service2 = TokenService::with_secret("secret2");

        let token1 = service1.issue(&identity(Role::Admin)).unwrap();
        let token2 = service2.issue(&identity(Role::Admin)).unwrap();
        assert_ne!(token1, token2);

        assert!(service1.verify(&token1).is_some());
        assert!(service2.verify(&token1).is_none());
        assert!(service2.verify(&token2).is_some());
        assert!(service1.verify(&token2).is_none());
    }

    #[test]
    fn test_other_hmac_algorithms_are_rejected() {
        let service = TokenService::with_secret(SECRET);
        let claims = TokenClaims::new(&identity(Role::Admin), Utc::now());

        for algorithm in [Algorithm::HS384, Algorithm::HS512] {
            let token = encode(
                &Header::new(algorithm),
                &claims,
                &EncodingKey::from_secret(SECRET.as_bytes()),
            )
            .unwrap();
            assert!(service.verify(&token).is_none(), "{algorithm:?} accepted");
        }
    }

    #[test]
    fn test_unsigned_token_is_rejected() {
        let service = TokenService::with_secret(SECRET);
        let token = service.issue(&identity(Role::Admin)).unwrap();
        let mut parts = token.split('.');
        let (_, payload) = (parts.next().unwrap(), parts.next().unwrap());
        // {"alg":"none","typ":"JWT"}
        let forged = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{payload}.");
        assert!(service.verify(&forged).is_none());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let service = TokenService::with_secret(SECRET);
        let payload = serde_json::json!({
            "id": "1",
            "email": "member@example.com",
            "role": "member",
            "iat": Utc::now().timestamp(),
            "exp": Utc::now().timestamp() + 3600,
        });
        let token = encode(
            &Header::new(TOKEN_ALGORITHM),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(service.verify(&token).is_none());
    }

    #[test]
    fn test_missing_secret_fails_closed() {
        let signer = TokenService::with_secret(SECRET);
        let token = signer.issue(&identity(Role::SuperAdmin)).unwrap();

        for service in [TokenService::new(None), TokenService::new(Some(String::new()))] {
            assert!(!service.has_secret());
            assert!(service.verify(&token).is_none());
            assert!(service.verify("").is_none());
            assert!(matches!(
                service.issue(&identity(Role::Admin)),
                Err(TokenError::MissingSecret)
            ));
        }
    }

    #[test]
    fn test_debug_output_redacts_secret() {
        let service = TokenService::with_secret(SECRET);
        assert!(!format!("{service:?}").contains(SECRET));
    }

    proptest! {
        #[test]
        fn test_flipping_any_byte_invalidates_token(
            index in any::<prop::sample::Index>(),
            mask in 1u8..=0x7f,
        ) {
            let service = TokenService::with_secret(SECRET);
            let token = service.issue(&identity(Role::Admin)).unwrap();

            let mut bytes = token.into_bytes();
            let i = index.index(bytes.len());
            bytes[i] ^= mask;
            let tampered = String::from_utf8(bytes).unwrap();

            prop_assert!(service.verify(&tampered).is_none());
        }
    }
}
