// tests/system_tests.rs

mod common;

use axum::{Router, body::Body, http::Request, routing::get};
use blog_backend::{routes, state::AppState};
use common::{spawn_app, test_config};
use tower::ServiceExt;

#[tokio::test]
async fn health_check_reports_version() {
    let app = spawn_app().await;

    let response = app.get("/api/health").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "API is running");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn database_status_reports_name() {
    let app = spawn_app().await;

    let response = app.get("/api/database").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["database"], "blog_test");
}

#[tokio::test]
async fn database_status_reports_closed_pool() {
    let app = spawn_app().await;
    app.pool.close().await;

    let response = app.get("/api/database").await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert!(body.get("database").is_none());
}

#[tokio::test]
async fn unknown_api_path_returns_json_404() {
    let app = spawn_app().await;

    let response = app.get("/api/random_path_that_does_not_exist").await;

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Endpoint not found");
}

#[tokio::test]
async fn unknown_page_returns_html_404() {
    let app = spawn_app().await;

    let response = app.get("/random_path_that_does_not_exist").await;

    assert_eq!(response.status().as_u16(), 404);
    assert!(response.text().await.unwrap().contains("<h1>404</h1>"));
}

#[tokio::test]
async fn panicking_handler_becomes_500() {
    async fn boom() -> &'static str {
        panic!("handler blew up")
    }

    let test_app = spawn_app().await;
    let config = test_config();
    let app = routes::with_middleware(Router::new().route("/boom", get(boom)), &config)
        .with_state(AppState {
            pool: test_app.pool.clone(),
            config,
        });

    let response = app
        .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
}
