use crate::application::{
    commands::authors::{
        CreateAuthorCommand, DeleteAuthorCommand, ImportAuthorItem, UpdateAuthorCommand,
    },
    dto::AuthorDto,
};
use crate::presentation::http::error::{ErrorBody, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::AdminAuthenticated;
use crate::presentation::http::openapi::StatusResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    pub name: String,
    pub slug: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// Blank `bio` or `avatarUrl` clears the field.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/admin/authors",
    request_body = CreateAuthorRequest,
    responses(
        (status = 201, description = "Author created, or the existing one with the same name.", body = AuthorDto),
        (status = 400, description = "Invalid input.", body = ErrorBody),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn create_author(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Json(payload): Json<CreateAuthorRequest>,
) -> HttpResult<(StatusCode, Json<AuthorDto>)> {
    let author = state
        .services
        .author_commands
        .create_author(CreateAuthorCommand {
            name: payload.name,
            slug: payload.slug,
            bio: payload.bio,
            avatar_url: payload.avatar_url,
        })
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(author)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportAuthorRequest {
    pub name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<ImportAuthorRequest> for ImportAuthorItem {
    fn from(value: ImportAuthorRequest) -> Self {
        Self {
            name: value.name,
            bio: value.bio,
            avatar_url: value.avatar_url,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/admin/authors/import",
    request_body = [ImportAuthorRequest],
    responses(
        (status = 200, description = "Every listed author, found or created.", body = [AuthorDto]),
        (status = 400, description = "At least one name is invalid; nothing was written.", body = ErrorBody),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn import_authors(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Json(payload): Json<Vec<ImportAuthorRequest>>,
) -> HttpResult<Json<Vec<AuthorDto>>> {
    let items = payload.into_iter().map(ImportAuthorItem::from).collect();

    state
        .services
        .author_commands
        .import_authors(items)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/admin/authors/{id}",
    params(("id" = i64, Path, description = "Author id")),
    request_body = UpdateAuthorRequest,
    responses(
        (status = 200, description = "Updated author.", body = AuthorDto),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody),
        (status = 404, description = "No such author.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn update_author(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAuthorRequest>,
) -> HttpResult<Json<AuthorDto>> {
    state
        .services
        .author_commands
        .update_author(UpdateAuthorCommand {
            id,
            name: payload.name,
            slug: payload.slug,
            bio: payload.bio,
            avatar_url: payload.avatar_url,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/admin/authors/{id}",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author deleted; their posts keep no author.", body = StatusResponse),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody),
        (status = 404, description = "No such author.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn delete_author(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .author_commands
        .delete_author(DeleteAuthorCommand { id })
        .await
        .into_http()?;

    Ok(Json(StatusResponse::deleted()))
}
