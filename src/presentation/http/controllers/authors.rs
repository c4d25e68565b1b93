use super::ListingParams;
use crate::application::{
    dto::{AuthorDto, AuthorPostsDto},
    error::ApplicationError,
    queries::{authors::AuthorQueryService, posts::AuthorPostsQuery},
};
use crate::domain::listing::SortKey;
use crate::presentation::http::error::{ErrorBody, HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};

#[utoipa::path(
    get,
    path = "/api/authors",
    params(ListingParams),
    responses(
        (status = 200, description = "All authors, alphabetical by default.", body = [AuthorDto]),
        (status = 400, description = "Unknown sort key.", body = ErrorBody)
    ),
    tag = "Authors"
)]
pub async fn list_authors(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ListingParams>,
) -> HttpResult<Json<Vec<AuthorDto>>> {
    let sort = params
        .sort_or(AuthorQueryService::DEFAULT_SORT)
        .map_err(|err| HttpError::from_error(ApplicationError::from(err)))?;

    state
        .services
        .author_queries
        .list_authors(sort)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/authors/{slug}",
    params(("slug" = String, Path, description = "Author slug")),
    responses(
        (status = 200, description = "A single author.", body = AuthorDto),
        (status = 404, description = "No author with this slug.", body = ErrorBody)
    ),
    tag = "Authors"
)]
pub async fn get_author(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<AuthorDto>> {
    state
        .services
        .author_queries
        .get_author_by_slug(&slug)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/authors/{slug}/posts",
    params(("slug" = String, Path, description = "Author slug"), ListingParams),
    responses(
        (status = 200, description = "The author and one page of their posts.", body = AuthorPostsDto),
        (status = 404, description = "No author with this slug.", body = ErrorBody)
    ),
    tag = "Authors"
)]
pub async fn author_posts(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
    Query(params): Query<ListingParams>,
) -> HttpResult<Json<AuthorPostsDto>> {
    let sort = params
        .sort_or(SortKey::NewestFirst)
        .map_err(|err| HttpError::from_error(ApplicationError::from(err)))?;

    state
        .services
        .post_queries
        .author_posts(AuthorPostsQuery {
            slug,
            page: params.page(),
            sort,
        })
        .await
        .into_http()
        .map(Json)
}
