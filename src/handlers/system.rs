// src/handlers/system.rs

use axum::{
    Json,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::{AppError, PageError},
};

/// Liveness check - always succeeds while the server is running.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "message": "API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Reports whether the database answers a trivial query.
pub async fn database_status(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "Database connection successful",
                "database": config.db_name,
            })),
        ),
        Err(e) => {
            tracing::error!("Database status check failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": "Failed to connect to database",
                })),
            )
        }
    }
}

/// Fallback for unknown routes: JSON under `/api`, the HTML 404 page elsewhere.
pub async fn not_found(uri: Uri) -> Response {
    if uri.path() == "/api" || uri.path().starts_with("/api/") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "status": "error",
                "message": "Endpoint not found",
            })),
        )
            .into_response();
    }

    PageError(AppError::NotFound(format!("No page at {}", uri.path()))).into_response()
}
