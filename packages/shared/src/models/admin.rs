use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::claims::{IdentityClaims, Role};

/// A CMS account. Only admins are stored; the public site is anonymous.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl AdminUser {
    pub fn new(email: String, password_hash: String, role: Role) -> Self {
        AdminUser {
            id: Uuid::new_v4().to_string(),
            email: email.trim().to_lowercase(),
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }

    pub fn identity(&self) -> IdentityClaims {
        IdentityClaims {
            id: self.id.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_admin_normalises_email() {
        let admin = AdminUser::new(
            "  Exec@RMITFinTech.Club ".to_string(),
            "hash".to_string(),
            Role::SuperAdmin,
        );
        assert_eq!(admin.email, "exec@rmitfintech.club");
        assert!(Uuid::parse_str(&admin.id).is_ok());
    }

    #[test]
    fn test_identity_never_carries_password_hash() {
        let admin = AdminUser::new(
            "exec@rmitfintech.club".to_string(),
            "$argon2id$secret".to_string(),
            Role::Admin,
        );
        let json = serde_json::to_string(&admin.identity()).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"role\":\"admin\""));
    }
}
