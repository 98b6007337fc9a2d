// src/handlers/users.rs

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    db,
    error::{AppError, is_unique_violation},
    extract::{AppJson, AppPath},
    models::user::{CreateUserRequest, NewUser, User},
    utils::hash::hash_password_off_thread,
};

/// Lists all users.
pub async fn list_users(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let users = User::find_all(&pool).await.map_err(|e| {
        tracing::error!("Failed to list users: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(users))
}

/// Retrieves a single user by ID.
pub async fn get_user(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::find(&pool, id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Creates a new user.
///
/// Validates the payload before touching the database, rejects duplicate
/// usernames and emails with 409, hashes the password with Argon2.
/// Returns 201 Created and the user object (excluding password).
pub async fn create_user(
    State(pool): State<SqlitePool>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let CreateUserRequest {
        username: Some(username),
        email: Some(email),
        password: Some(password),
        full_name,
        bio,
    } = payload
    else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    let password_hash = hash_password_off_thread(password).await?;

    let mut tx = db::begin_write(&pool).await?;

    if User::find_by_username(&mut *tx, &username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    if User::find_by_email(&mut *tx, &email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let user = NewUser {
        username,
        email,
        password_hash,
        full_name,
        bio,
    }
    .insert(&mut *tx)
    .await
    .map_err(|e| {
        // A concurrent request won the race past the checks above.
        if is_unique_violation(&e) {
            AppError::Conflict("Username or email already exists".to_string())
        } else {
            tracing::error!("Failed to create user: {:?}", e);
            AppError::from(e)
        }
    })?;

    tx.commit().await?;

    tracing::info!("Created user {} ({})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(user)))
}
