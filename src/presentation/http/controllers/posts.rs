use super::ListingParams;
use crate::application::{
    dto::PostDto,
    error::ApplicationError,
    queries::posts::{GetPostBySlugQuery, ListPostsQuery},
};
use crate::domain::listing::{PageResult, SortKey};
use crate::presentation::http::error::{ErrorBody, HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};

#[utoipa::path(
    get,
    path = "/api/posts",
    params(ListingParams),
    responses(
        (status = 200, description = "Home page listing, nine posts per page.", body = PageResult<PostDto>),
        (status = 400, description = "Unknown sort key.", body = ErrorBody)
    ),
    tag = "Posts"
)]
pub async fn list_posts(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ListingParams>,
) -> HttpResult<Json<PageResult<PostDto>>> {
    let sort = params
        .sort_or(SortKey::NewestFirst)
        .map_err(|err| HttpError::from_error(ApplicationError::from(err)))?;

    state
        .services
        .post_queries
        .list_posts(ListPostsQuery {
            page: params.page(),
            sort,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/posts/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "A single post.", body = PostDto),
        (status = 404, description = "No post with this slug.", body = ErrorBody)
    ),
    tag = "Posts"
)]
pub async fn get_post_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_queries
        .get_post_by_slug(GetPostBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}
