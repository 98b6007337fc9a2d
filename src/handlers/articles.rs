// src/handlers/articles.rs

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{SqliteConnection, SqlitePool};
use validator::Validate;

use crate::{
    config::Config,
    db,
    error::{AppError, is_unique_violation},
    extract::{AppJson, AppPath},
    models::{
        article::{
            Article, ArticleResponse, CreateArticleRequest, NewArticle, UpdateArticleRequest,
            slugify,
        },
        user::User,
    },
};

fn slug_conflict(slug: &str) -> AppError {
    AppError::Conflict(format!("An article with slug '{}' already exists", slug))
}

/// Loads the joined response for an article that is known to exist.
async fn load_response(conn: &mut SqliteConnection, id: i64) -> Result<ArticleResponse, AppError> {
    ArticleResponse::find(conn, id)
        .await?
        .ok_or(AppError::NotFound("Article not found".to_string()))
}

/// Lists published articles, newest first.
pub async fn list_articles(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let articles = ArticleResponse::list_published(&pool).await.map_err(|e| {
        tracing::error!("Failed to list articles: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(articles))
}

/// Retrieves a single article by ID, published or not.
pub async fn get_article(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let article = ArticleResponse::find(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Article not found".to_string()))?;

    Ok(Json(article))
}

/// Creates a new, unpublished article.
///
/// The slug is derived from the title; a clash with an existing slug is a 409.
/// Without `user_id` the article belongs to the default author.
pub async fn create_article(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    AppJson(payload): AppJson<CreateArticleRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let CreateArticleRequest {
        title: Some(title),
        content: Some(content),
        excerpt,
        user_id,
    } = payload
    else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    let mut tx = db::begin_write(&pool).await?;

    let author = match user_id {
        Some(id) => User::find(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("User {} does not exist", id)))?,
        None => User::find_by_username(&mut *tx, &config.default_author)
            .await?
            .ok_or_else(|| {
                AppError::InternalServerError(format!(
                    "Default author '{}' is missing",
                    config.default_author
                ))
            })?,
    };

    let slug = slugify(&title);
    let article = NewArticle {
        title,
        content,
        excerpt,
        user_id: author.id,
    }
    .insert(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            slug_conflict(&slug)
        } else {
            tracing::error!("Failed to create article: {:?}", e);
            AppError::from(e)
        }
    })?;

    let response = load_response(&mut tx, article.id).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Updates title, content and/or excerpt of an article.
/// A new title re-derives the slug.
pub async fn update_article(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateArticleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = db::begin_write(&pool).await?;

    let mut article = Article::find(&mut *tx, id)
        .await?
        .ok_or(AppError::NotFound("Article not found".to_string()))?;

    payload.validate()?;
    article.apply(payload);

    article.save(&mut *tx).await.map_err(|e| {
        if is_unique_violation(&e) {
            slug_conflict(&article.slug)
        } else {
            tracing::error!("Failed to update article: {:?}", e);
            AppError::from(e)
        }
    })?;

    let response = load_response(&mut tx, id).await?;
    tx.commit().await?;

    Ok(Json(response))
}

/// Publishes an article. Publishing again refreshes `published_at`.
pub async fn publish_article(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = db::begin_write(&pool).await?;

    let mut article = Article::find(&mut *tx, id)
        .await?
        .ok_or(AppError::NotFound("Article not found".to_string()))?;

    article.publish();
    article.save(&mut *tx).await?;

    let response = load_response(&mut tx, id).await?;
    tx.commit().await?;

    tracing::info!("Published article {} ({})", response.slug, id);

    Ok(Json(response))
}

/// Deletes an article by ID.
pub async fn delete_article(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = Article::delete(&pool, id).await.map_err(|e| {
        tracing::error!("Failed to delete article: {:?}", e);
        AppError::from(e)
    })?;

    if !deleted {
        return Err(AppError::NotFound("Article not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
