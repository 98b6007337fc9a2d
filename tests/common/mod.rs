// tests/common/mod.rs

#![allow(dead_code)]

use std::str::FromStr;

use blog_backend::{config::Config, db, routes, state::AppState};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tempfile::TempDir;

pub struct TestApp {
    /// Base URL, e.g. "http://127.0.0.1:12345".
    pub address: String,
    pub pool: SqlitePool,
    pub client: reqwest::Client,
    /// Keeps an on-disk database alive for the lifetime of the app.
    _db_dir: Option<TempDir>,
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        db_name: "blog_test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        rust_log: "error".to_string(),
        cors_origins: vec!["http://localhost:3000".to_string()],
        default_author: "editor".to_string(),
        default_author_password: None,
    }
}

/// Spawns the app on a random port over a private in-memory database.
pub async fn spawn_app() -> TestApp {
    let config = test_config();

    // One connection that never expires: every connection to
    // `sqlite::memory:` would otherwise get its own empty database.
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid test database URL")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    serve(pool, config, None).await
}

/// Spawns the app over a SQLite file in a temporary directory, using the
/// same pool settings as production. Needed wherever requests must run
/// concurrently on separate connections.
pub async fn spawn_app_on_disk() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = test_config();
    config.database_url = format!("sqlite://{}?mode=rwc", dir.path().join("blog.db").display());

    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to open on-disk database");

    serve(pool, config, Some(dir)).await
}

async fn serve(pool: SqlitePool, config: Config, db_dir: Option<TempDir>) -> TestApp {
    db::migrate(&pool).await.expect("Failed to migrate database");
    db::seed_default_author(&pool, &config)
        .await
        .expect("Failed to seed default author");

    let state = AppState {
        pool: pool.clone(),
        config,
    };
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        pool,
        client: reqwest::Client::new(),
        _db_dir: db_dir,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Creates a user and returns its JSON representation.
    pub async fn create_user(&self, username: &str) -> serde_json::Value {
        let response = self
            .post_json(
                "/api/users",
                serde_json::json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": "password123"
                }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
        response.json().await.unwrap()
    }

    /// Creates an article and returns its JSON representation.
    pub async fn create_article(&self, title: &str, user_id: Option<i64>) -> serde_json::Value {
        let mut body = serde_json::json!({ "title": title, "content": "Some content" });
        if let Some(id) = user_id {
            body["user_id"] = serde_json::json!(id);
        }
        let response = self.post_json("/api/articles", body).await;
        assert_eq!(response.status().as_u16(), 201);
        response.json().await.unwrap()
    }

    pub async fn publish(&self, id: i64) -> serde_json::Value {
        let response = self
            .client
            .post(self.url(&format!("/api/articles/{}/publish", id)))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status().as_u16(), 200);
        response.json().await.unwrap()
    }
}
