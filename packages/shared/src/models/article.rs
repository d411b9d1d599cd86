use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Article {
    pub fn new(title: String, slug: String, content: String, labels: Vec<String>) -> Self {
        Article {
            id: Uuid::new_v4(),
            title,
            slug,
            content,
            labels,
            created_at: Utc::now(),
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.eq_ignore_ascii_case(label))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateArticleRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Raw query parameters; numbers stay strings so bad input can be reported verbatim.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArticleListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub label: Option<String>,
}

/// Lowercase, hyphen-separated form of `input` suitable for URLs.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    for c in input.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
