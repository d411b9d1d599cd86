#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

use api::state::AppState;
use shared::datastore::{Connection, Datastore, DatastoreConnector, DatastoreError};
use shared::models::admin::AdminUser;
use shared::models::article::Article;
use shared::models::auth::claims::{IdentityClaims, Role};
use shared::repositories::admin_repository::AdminRepository;
use shared::repositories::article_repository::ArticleRepository;
use shared::repositories::errors::repository_errors::RepositoryError;
use shared::services::password::hash_password;
use shared::services::token_service::TokenService;

pub const SECRET: &str = "integration-test-secret";
pub const ADMIN_EMAIL: &str = "exec@rmitfintech.club";
pub const ADMIN_PASSWORD: &str = "correct horse battery";

#[derive(Default)]
pub struct InMemoryAdminRepository {
    admins: Mutex<Vec<AdminUser>>,
}

impl InMemoryAdminRepository {
    pub fn with_admin(admin: AdminUser) -> Self {
        InMemoryAdminRepository {
            admins: Mutex::new(vec![admin]),
        }
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn create_admin(&self, admin: &AdminUser) -> Result<(), RepositoryError> {
        let mut admins = self.admins.lock().unwrap();
        if admins.iter().any(|a| a.id == admin.id) {
            return Err(RepositoryError::DuplicateKey);
        }
        admins.push(admin.clone());
        Ok(())
    }

    async fn get_admin_by_email(&self, email: &str) -> Result<AdminUser, RepositoryError> {
        let email = email.trim().to_lowercase();
        self.admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
        Ok(self.get_admin_by_email(email).await.is_ok())
    }
}

#[derive(Default)]
pub struct InMemoryArticleRepository {
    articles: Mutex<Vec<Article>>,
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn create_article(&self, article: &Article) -> Result<(), RepositoryError> {
        let mut articles = self.articles.lock().unwrap();
        if articles.iter().any(|a| a.slug == article.slug) {
            return Err(RepositoryError::DuplicateKey);
        }
        articles.push(article.clone());
        Ok(())
    }

    async fn get_article(&self, id: Uuid) -> Result<Article, RepositoryError> {
        self.articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_articles(&self) -> Result<Vec<Article>, RepositoryError> {
        Ok(self.articles.lock().unwrap().clone())
    }

    async fn delete_article(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut articles = self.articles.lock().unwrap();
        let before = articles.len();
        articles.retain(|a| a.id != id);
        if articles.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Hands out one fixed connection and counts how often it was asked to.
pub struct CountingConnector {
    pub calls: AtomicUsize,
    connection: Option<Connection>,
    delay: Duration,
}

impl CountingConnector {
    pub fn new(connection: Connection) -> Self {
        CountingConnector {
            calls: AtomicUsize::new(0),
            connection: Some(connection),
            delay: Duration::ZERO,
        }
    }

    pub fn failing() -> Self {
        CountingConnector {
            calls: AtomicUsize::new(0),
            connection: None,
            delay: Duration::ZERO,
        }
    }

    /// Slow connects widen the window for concurrent first requests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatastoreConnector for CountingConnector {
    async fn connect(&self) -> Result<Connection, DatastoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.connection
            .clone()
            .ok_or_else(|| DatastoreError::Connection("connection refused".to_string()))
    }
}

pub fn seeded_admin(role: Role) -> AdminUser {
    AdminUser::new(
        ADMIN_EMAIL.to_string(),
        hash_password(ADMIN_PASSWORD).unwrap(),
        role,
    )
}

pub fn connection_with_admin(admin: AdminUser) -> Connection {
    Connection {
        admins: Arc::new(InMemoryAdminRepository::with_admin(admin)),
        articles: Arc::new(InMemoryArticleRepository::default()),
    }
}

pub struct TestContext {
    pub state: AppState,
    pub connector: Arc<CountingConnector>,
}

impl TestContext {
    pub fn new(secret: Option<&str>, connector: CountingConnector) -> Self {
        let connector = Arc::new(connector);
        let state = AppState {
            tokens: Arc::new(TokenService::new(secret.map(str::to_string))),
            datastore: Arc::new(Datastore::new(connector.clone())),
            secure_cookies: false,
        };
        TestContext { state, connector }
    }

    pub fn standard() -> Self {
        Self::new(
            Some(SECRET),
            CountingConnector::new(connection_with_admin(seeded_admin(Role::Admin))),
        )
    }

    pub fn app(&self) -> Router {
        api::create_app(self.state.clone())
    }

    pub fn cookie_for(&self, role: Role) -> String {
        let identity = IdentityClaims {
            id: "admin-1".to_string(),
            email: ADMIN_EMAIL.to_string(),
            role,
        };
        let token = TokenService::with_secret(SECRET).issue(&identity).unwrap();
        format!("token={token}")
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl TestResponse {
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn delete(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, cookie: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    post_raw(uri, cookie, body.to_string())
}

pub fn post_raw(uri: &str, cookie: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}
