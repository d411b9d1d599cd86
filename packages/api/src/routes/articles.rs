use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use lambda_http::tracing::{debug, error};

use crate::{
    error::ApiError,
    middleware::{
        auth::AuthenticatedAdmin,
        route::{admin_route, public_route},
    },
    state::AppState,
};
use shared::datastore::Connection;
use shared::models::article::{Article, ArticleListParams, CreateArticleRequest};
use shared::models::auth::responses::MessageResponse;
use shared::models::pagination::Paginated;
use shared::services::article_service::ArticleService;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/articles",
            public_route(get(list_articles), state)
                .merge(admin_route(post(create_article), state)),
        )
        .route(
            "/api/articles/{id}",
            public_route(get(get_article), state)
                .merge(admin_route(delete(delete_article), state)),
        )
}

async fn list_articles(
    Extension(connection): Extension<Connection>,
    query: Result<Query<ArticleListParams>, QueryRejection>,
) -> Result<Json<Paginated<Article>>, ApiError> {
    let Query(params) = query?;
    ArticleService::new(connection.articles)
        .list_articles(&params)
        .await
        .map(Json)
        .map_err(ApiError::from)
}

async fn get_article(
    Extension(connection): Extension<Connection>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Article>, ApiError> {
    let Path(id) = path?;
    ArticleService::new(connection.articles)
        .get_article(&id)
        .await
        .map(Json)
        .map_err(ApiError::from)
}

async fn create_article(
    Extension(connection): Extension<Connection>,
    admin: AuthenticatedAdmin,
    payload: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let Json(request) = payload?;

    let article = ArticleService::new(connection.articles)
        .create_article(request)
        .await
        .map_err(|e| {
            error!("Failed to create article for {}: {}", admin.identity.email, e);
            ApiError::from(e)
        })?;
    debug!("Article created by {}: {}", admin.identity.email, article.id);
    Ok((StatusCode::CREATED, Json(article)))
}

async fn delete_article(
    Extension(connection): Extension<Connection>,
    admin: AuthenticatedAdmin,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    ArticleService::new(connection.articles)
        .delete_article(&id)
        .await
        .map_err(|e| {
            error!("Failed to delete article {} for {}: {}", id, admin.identity.email, e);
            ApiError::from(e)
        })?;
    debug!("Article deleted by {}: {}", admin.identity.email, id);
    Ok(Json(MessageResponse::new("Article deleted")))
}
