// tests/e2e_http.rs
mod support;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::json;
use support::{
    TEST_ADMIN_TOKEN, admin_json, assert_error_response, get, make_test_router, read_json,
};
use tower::ServiceExt;

#[tokio::test]
async fn health_is_public() {
    let (app, _) = make_test_router();
    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await["status"], "ok");
}

#[tokio::test]
async fn admin_routes_require_the_token() {
    let (app, store) = make_test_router();
    let body = json!({ "name": "Кухня" });

    let missing = Request::builder()
        .method("POST")
        .uri("/api/admin/categories")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(missing).await.unwrap();
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;

    let wrong = Request::builder()
        .method("POST")
        .uri("/api/admin/categories")
        .header(header::AUTHORIZATION, "Bearer not-the-admin-token")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.oneshot(wrong).await.unwrap();
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;

    assert_eq!(store.category_count(), 0);
}

#[tokio::test]
async fn created_post_is_readable_by_slug() {
    let (app, _) = make_test_router();

    let resp = app
        .clone()
        .oneshot(admin_json(
            "POST",
            "/api/admin/posts",
            &json!({
                "title": "Мебель для балкона",
                "subtitle": "Компактные решения",
                "content": "Складной стол и два стула.",
                "categoryName": "Балкон",
                "authorName": "Анна"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = read_json(resp).await;
    assert_eq!(created["slug"], "mebel-dlya-balkona");
    assert_eq!(created["category"]["slug"], "balkon");

    let resp = app
        .clone()
        .oneshot(get("/api/posts/mebel-dlya-balkona"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let post = read_json(resp).await;
    assert_eq!(post["title"], "Мебель для балкона");
    assert_eq!(post["author"]["name"], "Анна");
    assert!(post["publishedAt"].is_string());

    let resp = app.oneshot(get("/api/categories/balkon/posts")).await.unwrap();
    let listing = read_json(resp).await;
    assert_eq!(listing["category"]["name"], "Балкон");
    assert_eq!(listing["posts"]["total"], 1);
}

#[tokio::test]
async fn unknown_post_is_404() {
    let (app, _) = make_test_router();
    let resp = app.oneshot(get("/api/posts/net-takogo")).await.unwrap();
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn blank_search_returns_empty_page() {
    let (app, store) = make_test_router();
    let resp = app.oneshot(get("/api/search?q=%20%20")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total"], 0);
    assert_eq!(body["totalPages"], 0);
    assert_eq!(body["pageSize"], 6);
    assert_eq!(store.page_fetches(), 0);
}

#[tokio::test]
async fn bad_page_values_fall_back_to_first_page() {
    let (app, _) = make_test_router();
    for query in ["page=abc", "page=0", "page=-3", ""] {
        let resp = app
            .clone()
            .oneshot(get(&format!("/api/posts?{query}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{query}");
        let body = read_json(resp).await;
        assert_eq!(body["page"], 1, "{query}");
        assert_eq!(body["pageSize"], 9);
    }
}

#[tokio::test]
async fn unknown_sort_key_is_rejected() {
    let (app, _) = make_test_router();
    let resp = app
        .oneshot(get("/api/categories?sort=random"))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn duplicate_titles_over_http_get_suffixes() {
    let (app, _) = make_test_router();
    let mut slugs = Vec::new();
    for _ in 0..2 {
        let resp = app
            .clone()
            .oneshot(admin_json(
                "POST",
                "/api/admin/posts",
                &json!({
                    "title": "Садовая мебель",
                    "content": "Текст",
                    "categoryName": "Сад"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        slugs.push(read_json(resp).await["slug"].clone());
    }
    assert_eq!(slugs, [json!("sadovaya-mebel"), json!("sadovaya-mebel-1")]);
}

#[tokio::test]
async fn category_with_posts_delete_is_conflict() {
    let (app, _) = make_test_router();
    let resp = app
        .clone()
        .oneshot(admin_json(
            "POST",
            "/api/admin/posts",
            &json!({ "title": "Стеллаж", "content": "Текст", "categoryName": "Кабинет" }),
        ))
        .await
        .unwrap();
    let category_id = read_json(resp).await["category"]["id"].as_i64().unwrap();

    let resp = app
        .oneshot(admin_json(
            "DELETE",
            &format!("/api/admin/categories/{category_id}"),
            &json!({}),
        ))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::CONFLICT, "Conflict").await;
}

#[tokio::test]
async fn import_then_delete_round() {
    let (app, store) = make_test_router();
    let resp = app
        .clone()
        .oneshot(admin_json(
            "POST",
            "/api/admin/posts/import",
            &json!({
                "posts": [
                    { "title": "Кресло", "content": "Текст", "category": "Гостиная" },
                    { "title": "Пуф", "content": "Текст", "category": "Гостиная", "author": "Олег" }
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let report = read_json(resp).await;
    assert_eq!(report["created"], 2);
    assert_eq!(report["updated"], 0);
    let id = report["posts"][0]["id"].as_i64().unwrap();

    let resp = app
        .oneshot(admin_json("DELETE", &format!("/api/admin/posts/{id}"), &json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await["status"], "deleted");
    assert_eq!(store.post_count(), 1);
}

#[tokio::test]
async fn slug_preview_and_form_derivation() {
    let (app, _) = make_test_router();
    let resp = app
        .clone()
        .oneshot(admin_json(
            "POST",
            "/api/admin/slug-preview",
            &json!({ "text": "Щедрый шкаф" }),
        ))
        .await
        .unwrap();
    assert_eq!(read_json(resp).await["slug"], "shchedryy-shkaf");

    let resp = app
        .oneshot(admin_json(
            "POST",
            "/api/admin/form/derive",
            &json!({
                "fields": { "slug": { "mode": "manual", "value": "moy-slug" } },
                "event": { "type": "source_changed", "source": "Новый стол" }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["fields"]["slug"]["value"], "moy-slug");
    assert_eq!(body["fields"]["meta_title"]["value"], "Новый стол");
    assert_eq!(body["fields"]["meta_title"]["mode"], "auto");
}

#[tokio::test]
async fn admin_listing_pages_by_twenty() {
    let (app, _) = make_test_router();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/posts?page=2&q=%D0%B4%D0%B8%D0%B2%D0%B0%D0%BD")
                .header(header::AUTHORIZATION, format!("Bearer {TEST_ADMIN_TOKEN}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!((body["page"].clone(), body["pageSize"].clone()), (json!(2), json!(20)));
}

#[tokio::test]
async fn openapi_document_is_served_with_etag() {
    let (app, _) = make_test_router();
    let resp = app
        .clone()
        .oneshot(get("/api-docs/openapi.json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let etag = resp.headers()[header::ETAG].to_str().unwrap().to_owned();
    let doc = read_json(resp).await;
    assert!(doc["paths"]["/api/search"].is_object());

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .header(header::IF_NONE_MATCH, etag)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn oversized_page_is_past_the_end_not_page_one() {
    let (app, _) = make_test_router();
    let resp = app
        .clone()
        .oneshot(admin_json(
            "POST",
            "/api/admin/posts",
            &json!({ "title": "Стеллаж", "content": "Текст", "categoryName": "Гостиная" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.oneshot(get("/api/posts?page=99999999999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total"], 1);
    assert_ne!(body["page"], 1);
}

#[tokio::test]
async fn post_import_accepts_bare_array_with_form_field_names() {
    let (app, store) = make_test_router();
    let resp = app
        .oneshot(admin_json(
            "POST",
            "/api/admin/posts/import",
            &json!([
                { "title": "Садовая мебель", "content": "x", "categoryName": "Сад", "authorName": "Олег" },
                { "title": "Гамак", "categoryName": "Сад" }
            ]),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let report = read_json(resp).await;
    assert_eq!(report["created"], 2);
    assert_eq!(report["posts"][0]["author"]["name"], "Олег");
    assert_eq!(report["posts"][1]["content"], "");
    assert_eq!(store.category_count(), 1);
}

#[tokio::test]
async fn category_and_author_imports_find_or_create() {
    let (app, store) = make_test_router();

    let resp = app
        .clone()
        .oneshot(admin_json(
            "POST",
            "/api/admin/categories/import",
            &json!([{ "name": "Прихожая" }, { "name": "прихожая" }, { "name": "Балкон" }]),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let categories = read_json(resp).await;
    assert_eq!(categories.as_array().map(Vec::len), Some(3));
    assert_eq!(categories[0]["id"], categories[1]["id"]);
    assert_eq!(store.category_count(), 2);

    let resp = app
        .clone()
        .oneshot(admin_json(
            "POST",
            "/api/admin/authors/import",
            &json!([{ "name": "Ирина", "bio": "Декоратор", "avatarUrl": "/img/irina.png" }]),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let authors = read_json(resp).await;
    assert_eq!(authors[0]["slug"], "irina");
    assert_eq!(authors[0]["avatarUrl"], "/img/irina.png");

    let resp = app
        .oneshot(admin_json(
            "POST",
            "/api/admin/authors/import",
            &json!([{ "name": "Павел" }, { "name": "" }]),
        ))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
    assert_eq!(store.author_count(), 1);
}

#[tokio::test]
async fn admin_loads_post_by_id_for_editing() {
    let (app, _) = make_test_router();
    let resp = app
        .clone()
        .oneshot(admin_json(
            "POST",
            "/api/admin/posts",
            &json!({ "title": "Тумба", "content": "Текст", "categoryName": "Спальня", "authorName": "Анна" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = read_json(resp).await["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(admin_json("GET", &format!("/api/admin/posts/{id}"), &json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let post = read_json(resp).await;
    assert_eq!(post["slug"], "tumba");
    assert_eq!(post["category"]["name"], "Спальня");
    assert_eq!(post["author"]["slug"], "anna");

    let resp = app
        .clone()
        .oneshot(admin_json("GET", &format!("/api/admin/posts/{}", id + 50), &json!({})))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    let resp = app.oneshot(get(&format!("/api/admin/posts/{id}"))).await.unwrap();
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}
