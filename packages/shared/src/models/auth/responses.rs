use serde::{Deserialize, Serialize};

use super::claims::IdentityClaims;

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: IdentityClaims,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SessionResponse {
    pub user: IdentityClaims,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
