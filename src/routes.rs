// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    handlers::{articles, pages, system, users},
    state::AppState,
};

/// Assembles the main application router.
///
/// * HTML pages at the root, JSON API under `/api`.
/// * Applies global middleware (Trace, panic-to-500, CORS).
/// * Injects global state (Database Pool, Config).
pub fn create_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{id}", get(users::get_user));

    let article_routes = Router::new()
        .route(
            "/",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route("/{id}/publish", post(articles::publish_article));

    let api_routes = Router::new()
        .route("/health", get(system::health))
        .route("/database", get(system::database_status))
        .nest("/users", user_routes)
        .nest("/articles", article_routes);

    let page_routes = Router::new()
        .route("/", get(pages::index))
        .route("/about", get(pages::about))
        .route("/articles", get(pages::articles))
        .route("/article/{slug}", get(pages::article_detail));

    let app = Router::new()
        .merge(page_routes)
        .nest("/api", api_routes)
        .fallback(system::not_found);

    with_middleware(app, &state.config).with_state(state)
}

/// Wraps `router` in the global middleware stack, outermost first.
pub fn with_middleware(router: Router<AppState>, config: &Config) -> Router<AppState> {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::new())
            .layer(cors),
    )
}
