// tests/page_tests.rs

mod common;

use common::spawn_app;

#[tokio::test]
async fn detail_page_counts_each_view() {
    let app = spawn_app().await;
    let article = app.create_article("Counted Article", None).await;
    let id = article["id"].as_i64().unwrap();

    for expected in 1..=5 {
        let response = app.get("/article/counted-article").await;
        assert_eq!(response.status().as_u16(), 200);
        let html = response.text().await.unwrap();
        assert!(html.contains("Counted Article"));
        assert!(html.contains(&format!("{} views", expected)));

        let current: serde_json::Value = app
            .get(&format!("/api/articles/{}", id))
            .await
            .json()
            .await
            .unwrap();
        assert_eq!(current["view_count"], expected);
    }
}

#[tokio::test]
async fn unknown_slug_renders_404_page() {
    let app = spawn_app().await;

    let response = app.get("/article/does-not-exist").await;

    assert_eq!(response.status().as_u16(), 404);
    let html = response.text().await.unwrap();
    assert!(html.contains("<h1>404</h1>"));
}

#[tokio::test]
async fn listing_page_shows_ten_published_per_page() {
    let app = spawn_app().await;

    for i in 1..=12 {
        let article = app.create_article(&format!("Post {}", i), None).await;
        app.publish(article["id"].as_i64().unwrap()).await;
    }
    app.create_article("Hidden Draft", None).await;

    let first = app.get("/articles").await;
    assert_eq!(first.status().as_u16(), 200);
    let html = first.text().await.unwrap();
    assert_eq!(html.matches("<article>").count(), 10);
    assert!(html.contains("Page 1 of 2"));
    assert!(!html.contains("Hidden Draft"));

    let second = app.get("/articles?page=2").await.text().await.unwrap();
    assert_eq!(second.matches("<article>").count(), 2);
    assert!(second.contains("Page 2 of 2"));

    let beyond = app.get("/articles?page=3").await;
    assert_eq!(beyond.status().as_u16(), 404);

    // Non-numeric pages fall back to the first page
    let fallback = app.get("/articles?page=abc").await.text().await.unwrap();
    assert!(fallback.contains("Page 1 of 2"));
}

#[tokio::test]
async fn empty_listing_still_renders() {
    let app = spawn_app().await;

    let response = app.get("/articles").await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("No published articles."));
}

#[tokio::test]
async fn home_and_about_pages_render() {
    let app = spawn_app().await;
    let article = app.create_article("Front Page News", None).await;
    app.publish(article["id"].as_i64().unwrap()).await;

    let home = app.get("/").await;
    assert_eq!(home.status().as_u16(), 200);
    assert!(home.text().await.unwrap().contains("/article/front-page-news"));

    let about = app.get("/about").await;
    assert_eq!(about.status().as_u16(), 200);
    assert!(about.text().await.unwrap().contains(env!("CARGO_PKG_VERSION")));
}
