use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::article::{slugify, Article, ArticleListParams, CreateArticleRequest};
use crate::models::pagination::{PageRequest, Paginated};
use crate::repositories::article_repository::ArticleRepository;
use crate::services::errors::article_service_errors::ArticleServiceError;

pub struct ArticleService {
    repository: Arc<dyn ArticleRepository>,
}

impl ArticleService {
    pub fn new(repository: Arc<dyn ArticleRepository>) -> Self {
        ArticleService { repository }
    }

    /// Newest first, optionally restricted to a label, then paginated.
    pub async fn list_articles(
        &self,
        params: &ArticleListParams,
    ) -> Result<Paginated<Article>, ArticleServiceError> {
        let page = PageRequest::parse(params.page.as_deref(), params.limit.as_deref()).map_err(
            |(field, value)| ArticleServiceError::InvalidField {
                field: field.to_string(),
                value,
            },
        )?;

        let mut articles = self.repository.list_articles().await?;
        if let Some(label) = params.label.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            articles.retain(|article| article.has_label(label));
        }
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(page.apply(articles))
    }

    pub async fn get_article(&self, id: &str) -> Result<Article, ArticleServiceError> {
        let id = parse_id(id)?;
        Ok(self.repository.get_article(id).await?)
    }

    pub async fn create_article(
        &self,
        request: CreateArticleRequest,
    ) -> Result<Article, ArticleServiceError> {
        let title = request.title.trim().to_string();
        let content = request.content.trim().to_string();
        let slug = slugify(request.slug.as_deref().unwrap_or(&title));

        let mut errors = Vec::new();
        if title.is_empty() {
            errors.push("Title is required".to_string());
        }
        if content.is_empty() {
            errors.push("Content is required".to_string());
        }
        if slug.is_empty() && !title.is_empty() {
            errors.push("Slug must contain at least one letter or digit".to_string());
        }
        if !errors.is_empty() {
            return Err(ArticleServiceError::Validation(errors));
        }

        let labels = request
            .labels
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        let article = Article::new(title, slug, content, labels);
        self.repository.create_article(&article).await?;
        info!(article_id = %article.id, slug = %article.slug, "Article created");
        Ok(article)
    }

    pub async fn delete_article(&self, id: &str) -> Result<(), ArticleServiceError> {
        let id = parse_id(id)?;
        self.repository.delete_article(id).await?;
        info!(article_id = %id, "Article deleted");
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<Uuid, ArticleServiceError> {
    Uuid::parse_str(id).map_err(|_| ArticleServiceError::InvalidField {
        field: "id".to_string(),
        value: id.to_string(),
    })
}
