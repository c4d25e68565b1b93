use crate::application::{
    commands::posts::{CreatePostCommand, DeletePostCommand, ImportPostItem, UpdatePostCommand},
    dto::{ImportReportDto, PostDto},
    error::ApplicationError,
    queries::posts::{AdminPostsQuery, GetPostByIdQuery},
};
use crate::domain::listing::{PageNumber, PageResult, SortKey};
use crate::presentation::http::error::{ErrorBody, HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::AdminAuthenticated;
use crate::presentation::http::openapi::StatusResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminPostsParams {
    pub page: Option<String>,
    pub sort: Option<String>,
    /// Optional text filter over title, subtitle, content and author name.
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub subtitle: Option<String>,
    /// Derived from the title when absent.
    pub slug: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub category_id: Option<i64>,
    /// Used when `categoryId` is absent; created if it does not exist.
    pub category_name: Option<String>,
    pub author_id: Option<i64>,
    pub author_name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub author_id: Option<i64>,
    pub author_name: Option<String>,
    #[serde(default)]
    pub remove_author: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportPostRequest {
    pub title: String,
    pub subtitle: Option<String>,
    pub slug: Option<String>,
    /// Empty when absent.
    #[serde(default)]
    pub content: String,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    /// Category name.
    #[serde(alias = "categoryName")]
    pub category: String,
    /// Author name.
    #[serde(alias = "authorName")]
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Either a bare array of posts or an object wrapping it under `posts`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ImportPostsRequest {
    Items(Vec<ImportPostRequest>),
    Wrapped { posts: Vec<ImportPostRequest> },
}

impl ImportPostsRequest {
    pub fn into_items(self) -> Vec<ImportPostItem> {
        let (Self::Items(posts) | Self::Wrapped { posts }) = self;
        posts.into_iter().map(ImportPostItem::from).collect()
    }
}

impl From<ImportPostRequest> for ImportPostItem {
    fn from(value: ImportPostRequest) -> Self {
        Self {
            title: value.title,
            subtitle: value.subtitle,
            slug: value.slug,
            content: value.content,
            image_url: value.image_url,
            meta_title: value.meta_title,
            meta_description: value.meta_description,
            category: value.category,
            author: value.author,
            published_at: value.published_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/posts",
    params(AdminPostsParams),
    responses(
        (status = 200, description = "Admin table of posts, twenty per page.", body = PageResult<PostDto>),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn list_posts(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Query(params): Query<AdminPostsParams>,
) -> HttpResult<Json<PageResult<PostDto>>> {
    let sort = SortKey::from_query(params.sort.as_deref(), SortKey::NewestFirst)
        .map_err(|err| HttpError::from_error(ApplicationError::from(err)))?;

    state
        .services
        .post_queries
        .list_posts_admin(AdminPostsQuery {
            page: PageNumber::from_query(params.page.as_deref()),
            sort,
            query: params.q,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/admin/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created with a unique slug.", body = PostDto),
        (status = 400, description = "Invalid input.", body = ErrorBody),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody),
        (status = 409, description = "No free slug could be reserved.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn create_post(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Json(payload): Json<CreatePostRequest>,
) -> HttpResult<(StatusCode, Json<PostDto>)> {
    let command = CreatePostCommand {
        title: payload.title,
        subtitle: payload.subtitle,
        slug: payload.slug,
        content: payload.content,
        image_url: payload.image_url,
        meta_title: payload.meta_title,
        meta_description: payload.meta_description,
        category_id: payload.category_id,
        category_name: payload.category_name,
        author_id: payload.author_id,
        author_name: payload.author_name,
        published_at: payload.published_at,
    };

    let post = state
        .services
        .post_commands
        .create_post(command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    get,
    path = "/api/admin/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post loaded for editing.", body = PostDto),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody),
        (status = 404, description = "No such post.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn get_post(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_queries
        .get_post_by_id(GetPostByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/admin/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated post.", body = PostDto),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody),
        (status = 404, description = "No such post.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn update_post(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> HttpResult<Json<PostDto>> {
    let command = UpdatePostCommand {
        id,
        title: payload.title,
        subtitle: payload.subtitle,
        slug: payload.slug,
        content: payload.content,
        image_url: payload.image_url,
        meta_title: payload.meta_title,
        meta_description: payload.meta_description,
        category_id: payload.category_id,
        category_name: payload.category_name,
        author_id: payload.author_id,
        author_name: payload.author_name,
        remove_author: payload.remove_author,
    };

    state
        .services
        .post_commands
        .update_post(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/admin/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted.", body = StatusResponse),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody),
        (status = 404, description = "No such post.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn delete_post(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .post_commands
        .delete_post(DeletePostCommand { id })
        .await
        .into_http()?;

    Ok(Json(StatusResponse::deleted()))
}

#[utoipa::path(
    post,
    path = "/api/admin/posts/import",
    request_body = ImportPostsRequest,
    responses(
        (status = 200, description = "Import summary.", body = ImportReportDto),
        (status = 400, description = "At least one item is invalid; nothing was written.", body = ErrorBody),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn import_posts(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Json(payload): Json<ImportPostsRequest>,
) -> HttpResult<Json<ImportReportDto>> {
    state
        .services
        .post_commands
        .import_posts(payload.into_items())
        .await
        .into_http()
        .map(Json)
}
