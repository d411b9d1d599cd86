//! Process-wide datastore handle.
//!
//! The first request to need the datastore opens the connection through a
//! [`DatastoreConnector`]; every later request (including concurrent ones)
//! reuses the cached [`Connection`]. [`Datastore::reset`] drops the cached
//! handle so tests can start from a clean slate.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::repositories::admin_repository::{AdminRepository, DynamoDbAdminRepository};
use crate::repositories::article_repository::{ArticleRepository, DynamoDbArticleRepository};

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
pub enum DatastoreError {
    #[error("Failed to connect to datastore: {0}")]
    Connection(String),
}

/// Repositories bound to one open connection. Cheap to clone.
#[derive(Clone)]
pub struct Connection {
    pub admins: Arc<dyn AdminRepository>,
    pub articles: Arc<dyn ArticleRepository>,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatastoreConnector: Send + Sync {
    async fn connect(&self) -> Result<Connection, DatastoreError>;
}

pub struct DynamoDbConnector {
    admins_table: String,
    articles_table: String,
}

impl DynamoDbConnector {
    pub fn new(admins_table: impl Into<String>, articles_table: impl Into<String>) -> Self {
        DynamoDbConnector {
            admins_table: admins_table.into(),
            articles_table: articles_table.into(),
        }
    }
}

#[async_trait]
impl DatastoreConnector for DynamoDbConnector {
    async fn connect(&self) -> Result<Connection, DatastoreError> {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        if config.region().is_none() {
            return Err(DatastoreError::Connection(
                "no AWS region configured".to_string(),
            ));
        }
        let client = aws_sdk_dynamodb::Client::new(&config);

        Ok(Connection {
            admins: Arc::new(DynamoDbAdminRepository::new(
                client.clone(),
                &self.admins_table,
            )),
            articles: Arc::new(DynamoDbArticleRepository::new(client, &self.articles_table)),
        })
    }
}

pub struct Datastore {
    connector: Arc<dyn DatastoreConnector>,
    connection: RwLock<Option<Connection>>,
}

impl Datastore {
    pub fn new(connector: Arc<dyn DatastoreConnector>) -> Self {
        Datastore {
            connector,
            connection: RwLock::new(None),
        }
    }

    /// Return the cached connection, opening it on first use.
    pub async fn ensure_connected(&self) -> Result<Connection, DatastoreError> {
        if let Some(connection) = self.connection.read().await.as_ref() {
            return Ok(connection.clone());
        }

        let mut slot = self.connection.write().await;
        // Another request may have connected while we waited for the lock.
        if let Some(connection) = slot.as_ref() {
            return Ok(connection.clone());
        }

        debug!("Opening datastore connection");
        let connection = self.connector.connect().await?;
        *slot = Some(connection.clone());
        info!("Datastore connection established");
        Ok(connection)
    }

    pub async fn is_connected(&self) -> bool {
        self.connection.read().await.is_some()
    }

    /// Drop the cached connection; the next request reconnects.
    pub async fn reset(&self) {
        if self.connection.write().await.take().is_some() {
            debug!("Datastore connection reset");
        }
    }
}
