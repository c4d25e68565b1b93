use super::ListingParams;
use crate::application::{
    dto::{CategoryDto, CategoryPostsDto},
    error::ApplicationError,
    queries::{categories::CategoryQueryService, posts::CategoryPostsQuery},
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
    path = "/api/categories",
    params(ListingParams),
    responses(
        (status = 200, description = "All categories, alphabetical by default.", body = [CategoryDto]),
        (status = 400, description = "Unknown sort key.", body = ErrorBody)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ListingParams>,
) -> HttpResult<Json<Vec<CategoryDto>>> {
    let sort = params
        .sort_or(CategoryQueryService::DEFAULT_SORT)
        .map_err(|err| HttpError::from_error(ApplicationError::from(err)))?;

    state
        .services
        .category_queries
        .list_categories(sort)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 200, description = "A single category.", body = CategoryDto),
        (status = 404, description = "No category with this slug.", body = ErrorBody)
    ),
    tag = "Categories"
)]
pub async fn get_category(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .category_queries
        .get_category_by_slug(&slug)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/categories/{slug}/posts",
    params(("slug" = String, Path, description = "Category slug"), ListingParams),
    responses(
        (status = 200, description = "The category and one page of its posts.", body = CategoryPostsDto),
        (status = 404, description = "No category with this slug.", body = ErrorBody)
    ),
    tag = "Categories"
)]
pub async fn category_posts(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
    Query(params): Query<ListingParams>,
) -> HttpResult<Json<CategoryPostsDto>> {
    let sort = params
        .sort_or(SortKey::NewestFirst)
        .map_err(|err| HttpError::from_error(ApplicationError::from(err)))?;

    state
        .services
        .post_queries
        .category_posts(CategoryPostsQuery {
            slug,
            page: params.page(),
            sort,
        })
        .await
        .into_http()
        .map(Json)
}
