use async_trait::async_trait;
use aws_sdk_dynamodb::types::{Delete, Put, TransactWriteItem};
use aws_sdk_dynamodb::Client;
use serde::{Deserialize, Serialize};
use serde_dynamo::{from_item, to_attribute_value, to_item};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::article::Article;
use crate::repositories::errors::repository_errors::RepositoryError;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Fails with `DuplicateKey` when the slug is already taken.
    async fn create_article(&self, article: &Article) -> Result<(), RepositoryError>;
    async fn get_article(&self, id: Uuid) -> Result<Article, RepositoryError>;
    async fn list_articles(&self) -> Result<Vec<Article>, RepositoryError>;
    async fn delete_article(&self, id: Uuid) -> Result<(), RepositoryError>;
}

/// Reserves a slug. Lives in the articles table under `slug#<slug>`.
#[derive(Debug, Serialize, Deserialize)]
struct SlugGuard {
    id: String,
    article_id: Uuid,
}

fn slug_key(slug: &str) -> String {
    format!("slug#{slug}")
}

pub struct DynamoDbArticleRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbArticleRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    fn key(
        &self,
        id: &str,
    ) -> Result<HashMap<String, aws_sdk_dynamodb::types::AttributeValue>, RepositoryError> {
        Ok(HashMap::from([("id".to_string(), to_attribute_value(id)?)]))
    }
}

#[async_trait]
impl ArticleRepository for DynamoDbArticleRepository {
    async fn create_article(&self, article: &Article) -> Result<(), RepositoryError> {
        let guard = SlugGuard {
            id: slug_key(&article.slug),
            article_id: article.id,
        };

        let put_article = Put::builder()
            .table_name(&self.table_name)
            .set_item(Some(to_item(article)?))
            .condition_expression("attribute_not_exists(id)")
            .build()
            .map_err(|e| RepositoryError::DynamoDb(e.to_string()))?;
        let put_guard = Put::builder()
            .table_name(&self.table_name)
            .set_item(Some(to_item(&guard)?))
            .condition_expression("attribute_not_exists(id)")
            .build()
            .map_err(|e| RepositoryError::DynamoDb(e.to_string()))?;

        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(put_article).build())
            .transact_items(TransactWriteItem::builder().put(put_guard).build())
            .send()
            .await
            .map_err(RepositoryError::from_sdk)?;
        Ok(())
    }

    async fn get_article(&self, id: Uuid) -> Result<Article, RepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(self.key(&id.to_string())?))
            .send()
            .await
            .map_err(RepositoryError::from_sdk)?;

        match output.item {
            Some(item) => Ok(from_item(item)?),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn list_articles(&self) -> Result<Vec<Article>, RepositoryError> {
        let mut articles = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression("attribute_exists(title)")
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(RepositoryError::from_sdk)?;

            for item in output.items.unwrap_or_default() {
                articles.push(from_item(item)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(articles)
    }

    async fn delete_article(&self, id: Uuid) -> Result<(), RepositoryError> {
        let article = self.get_article(id).await?;

        let delete_article = Delete::builder()
            .table_name(&self.table_name)
            .set_key(Some(self.key(&article.id.to_string())?))
            .build()
            .map_err(|e| RepositoryError::DynamoDb(e.to_string()))?;
        let delete_guard = Delete::builder()
            .table_name(&self.table_name)
            .set_key(Some(self.key(&slug_key(&article.slug))?))
            .build()
            .map_err(|e| RepositoryError::DynamoDb(e.to_string()))?;

        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().delete(delete_article).build())
            .transact_items(TransactWriteItem::builder().delete(delete_guard).build())
            .send()
            .await
            .map_err(RepositoryError::from_sdk)?;
        Ok(())
    }
}
