// src/config.rs

use std::env;
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Name reported by the database status endpoint.
    pub db_name: String,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub cors_origins: Vec<String>,
    /// Account that owns articles created without an explicit `user_id`.
    pub default_author: String,
    pub default_author_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://blog.db?mode=rwc".to_string());

        let db_name = env::var("DB_NAME").unwrap_or_else(|_| "blog".to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let default_author = env::var("DEFAULT_AUTHOR")
            .unwrap_or_else(|_| "editor".to_string());

        let default_author_password = env::var("DEFAULT_AUTHOR_PASSWORD").ok();

        Self {
            database_url,
            db_name,
            host,
            port,
            rust_log,
            cors_origins,
            default_author,
            default_author_password,
        }
    }
}
