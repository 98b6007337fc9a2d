// src/views.rs

//! Askama templates for the server-rendered pages.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::{
    models::article::{ArticleResponse, Pagination},
    utils::html::clean_html,
};

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%B %d, %Y").to_string())
        .unwrap_or_default()
}

/// Listing entry for an article.
pub struct ArticleCard {
    pub title: String,
    pub slug: String,
    pub author: String,
    pub excerpt: String,
    pub published_on: String,
}

impl From<ArticleResponse> for ArticleCard {
    fn from(article: ArticleResponse) -> Self {
        Self {
            published_on: format_date(article.published_at),
            title: article.title,
            slug: article.slug,
            author: article.author,
            excerpt: article.excerpt.unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub recent: Vec<ArticleCard>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub version: &'static str,
}

#[derive(Template)]
#[template(path = "articles.html")]
pub struct ArticlesPage {
    pub articles: Vec<ArticleCard>,
    pub page: i64,
    pub pages: i64,
    pub total: i64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl ArticlesPage {
    pub fn new(articles: Vec<ArticleResponse>, pagination: Pagination) -> Self {
        Self {
            articles: articles.into_iter().map(ArticleCard::from).collect(),
            page: pagination.page,
            pages: pagination.pages(),
            total: pagination.total,
            has_prev: pagination.has_prev(),
            has_next: pagination.has_next(),
        }
    }
}

#[derive(Template)]
#[template(path = "article.html")]
pub struct ArticlePage {
    pub title: String,
    pub author: String,
    pub excerpt: String,
    /// Sanitized, rendered unescaped.
    pub content_html: String,
    pub view_count: i64,
    pub published_on: String,
}

impl From<ArticleResponse> for ArticlePage {
    fn from(article: ArticleResponse) -> Self {
        Self {
            content_html: clean_html(&article.content),
            published_on: format_date(article.published_at),
            title: article.title,
            author: article.author,
            excerpt: article.excerpt.unwrap_or_default(),
            view_count: article.view_count,
        }
    }
}

#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundPage;

#[derive(Template)]
#[template(path = "500.html")]
pub struct ServerErrorPage;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_page_escapes_title_and_sanitizes_content() {
        let now = Utc::now();
        let page = ArticlePage::from(ArticleResponse {
            id: 1,
            title: "<i>Tags</i> & more".to_string(),
            slug: "<i>tags</i>-&-more".to_string(),
            excerpt: None,
            content: "<p>Hello</p><script>alert(1)</script>".to_string(),
            author: "alice".to_string(),
            is_published: true,
            view_count: 3,
            created_at: now,
            updated_at: now,
            published_at: Some(now),
        });

        let html = page.render().unwrap();
        assert!(html.contains("&lt;i&gt;Tags"));
        assert!(!html.contains("<i>Tags"));
        assert!(html.contains("<p>Hello</p>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn error_pages_render() {
        assert!(NotFoundPage.render().unwrap().contains("404"));
        assert!(ServerErrorPage.render().unwrap().contains("500"));
    }
}
