use crate::application::{
    commands::categories::{
        CreateCategoryCommand, DeleteCategoryCommand, ImportCategoryItem, UpdateCategoryCommand,
    },
    dto::CategoryDto,
};
use crate::presentation::http::error::{ErrorBody, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::AdminAuthenticated;
use crate::presentation::http::openapi::StatusResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created, or the existing one with the same name.", body = CategoryDto),
        (status = 400, description = "Invalid input.", body = ErrorBody),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn create_category(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Json(payload): Json<CreateCategoryRequest>,
) -> HttpResult<(StatusCode, Json<CategoryDto>)> {
    let category = state
        .services
        .category_commands
        .create_category(CreateCategoryCommand {
            name: payload.name,
            slug: payload.slug,
        })
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ImportCategoryRequest {
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/api/admin/categories/import",
    request_body = [ImportCategoryRequest],
    responses(
        (status = 200, description = "Every listed category, found or created.", body = [CategoryDto]),
        (status = 400, description = "At least one name is invalid; nothing was written.", body = ErrorBody),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn import_categories(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Json(payload): Json<Vec<ImportCategoryRequest>>,
) -> HttpResult<Json<Vec<CategoryDto>>> {
    let items = payload
        .into_iter()
        .map(|item| ImportCategoryItem { name: item.name })
        .collect();

    state
        .services
        .category_commands
        .import_categories(items)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(("id" = i64, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Updated category.", body = CategoryDto),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody),
        (status = 404, description = "No such category.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn update_category(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .category_commands
        .update_category(UpdateCategoryCommand {
            id,
            name: payload.name,
            slug: payload.slug,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted.", body = StatusResponse),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody),
        (status = 404, description = "No such category.", body = ErrorBody),
        (status = 409, description = "The category still has posts.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn delete_category(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .category_commands
        .delete_category(DeleteCategoryCommand { id })
        .await
        .into_http()?;

    Ok(Json(StatusResponse::deleted()))
}
