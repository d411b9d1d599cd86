use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};

use crate::models::admin::AdminUser;
use crate::repositories::errors::repository_errors::RepositoryError;

#[cfg(test)]
use mockall::automock;

pub const ADMIN_EMAIL_INDEX: &str = "GSI_AdminByEmail";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create_admin(&self, admin: &AdminUser) -> Result<(), RepositoryError>;
    async fn get_admin_by_email(&self, email: &str) -> Result<AdminUser, RepositoryError>;
    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError>;
}

pub struct DynamoDbAdminRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbAdminRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl AdminRepository for DynamoDbAdminRepository {
    async fn create_admin(&self, admin: &AdminUser) -> Result<(), RepositoryError> {
        let item = to_item(admin)?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(RepositoryError::from_sdk)?;
        Ok(())
    }

    async fn get_admin_by_email(&self, email: &str) -> Result<AdminUser, RepositoryError> {
        let email = email.trim().to_lowercase();
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(ADMIN_EMAIL_INDEX)
            .key_condition_expression("email = :email")
            .expression_attribute_values(":email", to_attribute_value(&email)?)
            .limit(1)
            .send()
            .await
            .map_err(RepositoryError::from_sdk)?;

        match output.items.and_then(|items| items.into_iter().next()) {
            Some(item) => Ok(from_item(item)?),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
        match self.get_admin_by_email(email).await {
            Ok(_) => Ok(true),
            Err(RepositoryError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
