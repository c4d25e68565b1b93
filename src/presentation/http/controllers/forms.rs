use crate::application::{
    dto::{DerivedFormDto, SlugPreviewDto},
    queries::forms::FormEvent,
};
use crate::domain::form::{DependentField, FormFields};
use crate::presentation::http::error::ErrorBody;
use crate::presentation::http::extractors::AdminAuthenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SlugPreviewRequest {
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEventRequest {
    /// The title or name field changed.
    SourceChanged { source: String },
    /// The editor typed into a dependent field.
    FieldEdited { field: DependentField, value: String },
    /// The form was cleared.
    Reset,
}

impl From<FormEventRequest> for FormEvent {
    fn from(value: FormEventRequest) -> Self {
        match value {
            FormEventRequest::SourceChanged { source } => Self::SourceChanged(source),
            FormEventRequest::FieldEdited { field, value } => Self::FieldEdited { field, value },
            FormEventRequest::Reset => Self::Reset,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeriveFormRequest {
    #[serde(default)]
    pub fields: FormFields,
    pub event: FormEventRequest,
}

#[utoipa::path(
    post,
    path = "/api/admin/slug-preview",
    request_body = SlugPreviewRequest,
    responses(
        (status = 200, description = "Transliterated slug, before uniqueness is applied.", body = SlugPreviewDto),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn slug_preview(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Json(payload): Json<SlugPreviewRequest>,
) -> Json<SlugPreviewDto> {
    Json(state.services.forms.preview_slug(&payload.text))
}

#[utoipa::path(
    post,
    path = "/api/admin/form/derive",
    request_body = DeriveFormRequest,
    responses(
        (status = 200, description = "Dependent fields after applying the event.", body = DerivedFormDto),
        (status = 401, description = "Missing or invalid admin token.", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Admin"
)]
pub async fn derive_form(
    Extension(state): Extension<HttpState>,
    _admin: AdminAuthenticated,
    Json(payload): Json<DeriveFormRequest>,
) -> Json<DerivedFormDto> {
    Json(
        state
            .services
            .forms
            .derive_form(payload.fields, payload.event.into()),
    )
}
