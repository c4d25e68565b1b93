// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{
        admin_authors, admin_categories, admin_posts, authors, categories, forms, posts, search,
    },
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post, put},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    let admin = Router::new()
        .route(
            "/posts",
            get(admin_posts::list_posts).post(admin_posts::create_post),
        )
        .route("/posts/import", post(admin_posts::import_posts))
        .route(
            "/posts/{id}",
            get(admin_posts::get_post)
                .put(admin_posts::update_post)
                .delete(admin_posts::delete_post),
        )
        .route("/categories", post(admin_categories::create_category))
        .route("/categories/import", post(admin_categories::import_categories))
        .route(
            "/categories/{id}",
            put(admin_categories::update_category).delete(admin_categories::delete_category),
        )
        .route("/authors", post(admin_authors::create_author))
        .route("/authors/import", post(admin_authors::import_authors))
        .route(
            "/authors/{id}",
            put(admin_authors::update_author).delete(admin_authors::delete_author),
        )
        .route("/slug-preview", post(forms::slug_preview))
        .route("/form/derive", post(forms::derive_form));

    Router::new()
        .route("/health", get(health))
        .route(openapi::OPENAPI_PATH, get(openapi::serve_openapi))
        .route("/api/posts", get(posts::list_posts))
        .route("/api/posts/{slug}", get(posts::get_post_by_slug))
        .route("/api/search", get(search::search_posts))
        .route("/api/categories", get(categories::list_categories))
        .route("/api/categories/{slug}", get(categories::get_category))
        .route(
            "/api/categories/{slug}/posts",
            get(categories::category_posts),
        )
        .route("/api/authors", get(authors::list_authors))
        .route("/api/authors/{slug}", get(authors::get_author))
        .route("/api/authors/{slug}/posts", get(authors::author_posts))
        .nest("/api/admin", admin)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse::ok())
}
