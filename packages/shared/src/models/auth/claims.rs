use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifetime of an issued token and of the cookie that carries it.
pub const TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Roles an account can hold. Both grant access to admin-only routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "superadmin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "superadmin",
        }
    }

    /// Admin and superadmin currently share a single authorization tier.
    pub fn is_admin_equivalent(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity carried inside a signed token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IdentityClaims {
    pub id: String,
    pub email: String,
    pub role: Role,
}

/// Full JWT payload: the identity plus the registered time claims.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenClaims {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub iat: i64, // issued at
    pub exp: i64, // expiration time
}

impl TokenClaims {
    pub fn new(identity: &IdentityClaims, issued_at: DateTime<Utc>) -> Self {
        let iat = issued_at.timestamp();
        TokenClaims {
            id: identity.id.clone(),
            email: identity.email.clone(),
            role: identity.role,
            iat,
            exp: iat + TOKEN_TTL_SECONDS,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

impl From<TokenClaims> for IdentityClaims {
    fn from(claims: TokenClaims) -> Self {
        IdentityClaims {
            id: claims.id,
            email: claims.email,
            role: claims.role,
        }
    }
}
