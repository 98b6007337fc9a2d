// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite};
use validator::Validate;

use crate::{
    error::AppError,
    utils::hash::{hash_password, verify_password},
};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, full_name, bio, is_active, created_at, updated_at";

/// Represents the 'users' table in the database.
///
/// Serializes to the public user shape; the password hash never leaves the server.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,

    /// Unique username.
    pub username: String,

    /// Unique email address.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password_hash: String,

    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Replaces the stored hash with a fresh Argon2 hash of `password`.
    pub fn set_password(&mut self, password: &str) -> Result<(), AppError> {
        self.password_hash = hash_password(password)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// A hash that cannot be parsed never matches.
    pub fn check_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash).unwrap_or(false)
    }

    pub async fn find_all<'e, E>(executor: E) -> Result<Vec<User>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
            .fetch_all(executor)
            .await
    }

    pub async fn find<'e, E>(executor: E, id: i64) -> Result<Option<User>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_by_username<'e, E>(
        executor: E,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(executor)
        .await
    }

    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(executor)
            .await
    }

    /// Writes every mutable column back and refreshes `updated_at`.
    pub async fn save<'e, E>(&mut self, executor: E) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        self.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE users
            SET username = ?, email = ?, password_hash = ?, full_name = ?, bio = ?,
                is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&self.username)
        .bind(&self.email)
        .bind(&self.password_hash)
        .bind(&self.full_name)
        .bind(&self.bio)
        .bind(self.is_active)
        .bind(self.updated_at)
        .bind(self.id)
        .execute(executor)
        .await?;

        Ok(())
    }
}

/// A user that has not been stored yet.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
}

impl NewUser {
    pub async fn insert<'e, E>(self, executor: E) -> Result<User, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();

        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, full_name, bio, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, TRUE, ?, ?)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(self.username)
        .bind(self.email)
        .bind(self.password_hash)
        .bind(self.full_name)
        .bind(self.bio)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await
    }
}

/// DTO for creating a new user.
///
/// Every field is optional at the serde level so that a missing field is
/// reported as a validation error instead of a body rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        required(message = "username is required"),
        length(min = 1, max = 80, message = "Username length must be between 1 and 80 characters.")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "email is required"),
        email(message = "email must be a valid address"),
        length(max = 120, message = "Email must be at most 120 characters.")
    )]
    pub email: Option<String>,

    #[validate(length(max = 120, message = "Full name must be at most 120 characters."))]
    pub full_name: Option<String>,

    pub bio: Option<String>,

    #[validate(
        required(message = "password is required"),
        length(min = 4, max = 128, message = "Password length must be between 4 and 128 characters.")
    )]
    pub password: Option<String>,
}
