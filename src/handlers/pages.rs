// src/handlers/pages.rs

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    db,
    error::{AppError, PageError},
    models::article::{ARTICLES_PER_PAGE, Article, ArticleResponse, Pagination},
    views::{AboutPage, ArticleCard, ArticlePage, ArticlesPage, IndexPage},
};

const RECENT_ON_HOME: i64 = 5;

/// Query parameters for the article listing.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    /// Kept as text: anything that is not a number falls back to page 1.
    pub page: Option<String>,
}

impl PageParams {
    fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// Home page with the latest published articles.
pub async fn index(State(pool): State<SqlitePool>) -> Result<Html<String>, PageError> {
    let recent = ArticleResponse::page_published(&pool, 1, RECENT_ON_HOME).await?;

    let page = IndexPage {
        recent: recent.into_iter().map(ArticleCard::from).collect(),
    };

    Ok(Html(page.render()?))
}

pub async fn about() -> Result<Html<String>, PageError> {
    let page = AboutPage {
        version: env!("CARGO_PKG_VERSION"),
    };

    Ok(Html(page.render()?))
}

/// Published articles, ten per page.
/// Pages outside the listing are 404, except page 1 which always exists.
pub async fn articles(
    State(pool): State<SqlitePool>,
    Query(params): Query<PageParams>,
) -> Result<Html<String>, PageError> {
    let total = ArticleResponse::count_published(&pool).await?;
    let pagination = Pagination::new(params.page(), ARTICLES_PER_PAGE, total);

    if !pagination.is_valid() {
        return Err(AppError::NotFound("Page not found".to_string()).into());
    }

    let articles =
        ArticleResponse::page_published(&pool, pagination.page, ARTICLES_PER_PAGE).await?;

    Ok(Html(ArticlesPage::new(articles, pagination).render()?))
}

/// Article detail page. Every render counts as one view.
pub async fn article_detail(
    State(pool): State<SqlitePool>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let mut tx = db::begin_write(&pool).await?;

    if !Article::record_view(&mut *tx, &slug).await? {
        return Err(AppError::NotFound("Article not found".to_string()).into());
    }

    let article = ArticleResponse::find_by_slug(&mut *tx, &slug)
        .await?
        .ok_or(AppError::NotFound("Article not found".to_string()))?;

    tx.commit().await?;

    Ok(Html(ArticlePage::from(article).render()?))
}
