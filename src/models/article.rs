// src/models/article.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite};
use validator::Validate;

const ARTICLE_COLUMNS: &str = "id, title, slug, content, excerpt, user_id, is_published, \
     view_count, created_at, updated_at, published_at";

/// Article columns joined with the author's username, in response order.
const ARTICLE_WITH_AUTHOR: &str = r#"
    SELECT a.id, a.title, a.slug, a.excerpt, a.content, u.username AS author,
           a.is_published, a.view_count, a.created_at, a.updated_at, a.published_at
    FROM articles a
    JOIN users u ON u.id = a.user_id
"#;

/// Fixed page size of the public article listing.
pub const ARTICLES_PER_PAGE: i64 = 10;

/// Derives the URL slug for a title: lowercase, spaces become hyphens.
pub fn slugify(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// Represents the 'articles' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    /// Unique, derived from `title`.
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    /// Owning user.
    pub user_id: i64,
    pub is_published: bool,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Marks the article as published. Calling it again only re-stamps `published_at`.
    pub fn publish(&mut self) {
        self.is_published = true;
        self.published_at = Some(Utc::now());
    }

    /// Sets the title and recomputes the slug from it.
    pub fn set_title(&mut self, title: String) {
        self.slug = slugify(&title);
        self.title = title;
    }

    /// Applies the fields present in `changes`. A null or empty excerpt clears it.
    pub fn apply(&mut self, changes: UpdateArticleRequest) {
        if let Some(title) = changes.title {
            self.set_title(title);
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(excerpt) = changes.excerpt {
            self.excerpt = excerpt.filter(|e| !e.is_empty());
        }
    }

    pub async fn find<'e, E>(executor: E, id: i64) -> Result<Option<Article>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Persists content and publication state and refreshes `updated_at`.
    ///
    /// `view_count` is left alone; it only moves through [`Article::record_view`].
    pub async fn save<'e, E>(&mut self, executor: E) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE articles
            SET title = ?, slug = ?, content = ?, excerpt = ?,
                is_published = ?, published_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&self.title)
        .bind(&self.slug)
        .bind(&self.content)
        .bind(&self.excerpt)
        .bind(self.is_published)
        .bind(self.published_at)
        .bind(self.updated_at)
        .bind(self.id)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Atomically bumps the view counter of the article with `slug`.
    /// Returns false when no such article exists.
    pub async fn record_view<'e, E>(executor: E, slug: &str) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE articles SET view_count = view_count + 1, updated_at = ? WHERE slug = ?",
        )
        .bind(Utc::now())
        .bind(slug)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// An article that has not been stored yet.
#[derive(Debug)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub user_id: i64,
}

impl NewArticle {
    /// The slug is computed here, from the title.
    pub async fn insert<'e, E>(self, executor: E) -> Result<Article, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        let slug = slugify(&self.title);

        sqlx::query_as::<_, Article>(&format!(
            r#"
            INSERT INTO articles
            (title, slug, content, excerpt, user_id, is_published, view_count, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, FALSE, 0, ?, ?)
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(self.title)
        .bind(slug)
        .bind(self.content)
        .bind(self.excerpt.filter(|e| !e.is_empty()))
        .bind(self.user_id)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await
    }
}

/// Public JSON shape of an article, with the author's username joined in.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ArticleResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub author: String,
    pub is_published: bool,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl ArticleResponse {
    pub async fn find<'e, E>(executor: E, id: i64) -> Result<Option<ArticleResponse>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, ArticleResponse>(&format!("{ARTICLE_WITH_AUTHOR} WHERE a.id = ?"))
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_by_slug<'e, E>(
        executor: E,
        slug: &str,
    ) -> Result<Option<ArticleResponse>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, ArticleResponse>(&format!("{ARTICLE_WITH_AUTHOR} WHERE a.slug = ?"))
            .bind(slug)
            .fetch_optional(executor)
            .await
    }

    /// Published articles, newest first.
    pub async fn list_published<'e, E>(executor: E) -> Result<Vec<ArticleResponse>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, ArticleResponse>(&format!(
            "{ARTICLE_WITH_AUTHOR} WHERE a.is_published = TRUE ORDER BY a.created_at DESC, a.id DESC"
        ))
        .fetch_all(executor)
        .await
    }

    /// One page of published articles. `page` is 1-based.
    pub async fn page_published<'e, E>(
        executor: E,
        page: i64,
        per_page: i64,
    ) -> Result<Vec<ArticleResponse>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, ArticleResponse>(&format!(
            "{ARTICLE_WITH_AUTHOR} WHERE a.is_published = TRUE \
             ORDER BY a.created_at DESC, a.id DESC LIMIT ? OFFSET ?"
        ))
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(executor)
        .await
    }

    pub async fn count_published<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE is_published = TRUE")
            .fetch_one(executor)
            .await
    }
}

/// DTO for creating a new article.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateArticleRequest {
    #[validate(
        required(message = "title is required"),
        length(min = 1, max = 200, message = "Title length must be between 1 and 200 chars")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "content is required"),
        length(min = 1, message = "Content must not be empty")
    )]
    pub content: Option<String>,

    #[validate(length(max = 500, message = "Excerpt must be at most 500 chars"))]
    pub excerpt: Option<String>,

    /// Author; the default author account is used when absent.
    pub user_id: Option<i64>,
}

/// DTO for updating an article. Fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateArticleRequest {
    #[validate(length(min = 1, max = 200, message = "Title length must be between 1 and 200 chars"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,

    /// Outer `None` leaves the excerpt alone, `Some(None)` is an explicit null.
    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = 500, message = "Excerpt must be at most 500 chars"))]
    pub excerpt: Option<Option<String>>,
}

/// Marks a field that appeared in the payload, even as `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Page metadata for the article listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self { page, per_page, total }
    }

    /// Number of pages; an empty listing still has one (empty) page.
    pub fn pages(&self) -> i64 {
        ((self.total + self.per_page - 1) / self.per_page).max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages()
    }

    /// Page 1 always exists; any other page must fall inside the listing.
    pub fn is_valid(&self) -> bool {
        self.page == 1 || (self.page > 1 && self.page <= self.pages())
    }
}
