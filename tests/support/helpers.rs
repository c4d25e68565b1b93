// tests/support/helpers.rs
use super::mocks::{InMemoryBlog, StepClock};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use mebel_blog::{
    application::services::ApplicationServices,
    infrastructure::util::TransliteratingSlugGenerator,
    presentation::http::{routes::build_router, state::HttpState},
};
use serde_json::Value;
use std::sync::Arc;

pub const TEST_ADMIN_TOKEN: &str = "test-admin-token-123456";

pub fn build_services(store: &Arc<InMemoryBlog>) -> Arc<ApplicationServices> {
    Arc::new(ApplicationServices::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(StepClock::default()),
        Arc::new(TransliteratingSlugGenerator),
    ))
}

pub fn build_test_state() -> (HttpState, Arc<InMemoryBlog>) {
    let store = Arc::new(InMemoryBlog::default());
    let state = HttpState::new(build_services(&store), TEST_ADMIN_TOKEN);
    (state, store)
}

pub fn make_test_router() -> (Router, Arc<InMemoryBlog>) {
    let (state, store) = build_test_state();
    (build_router(state, &["*".to_string()]), store)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Admin request carrying the test bearer token and a JSON body.
pub fn admin_json(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TEST_ADMIN_TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status(), expected_status);
    let body = read_json(resp).await;
    assert_eq!(body["error"], expected_error, "unexpected body: {body}");
    assert!(body["message"].is_string());
}
