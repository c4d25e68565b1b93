use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufWriter, path::Path, sync::OnceLock};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};

mod handlers;

pub use handlers::serve_openapi;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
const OPENAPI_CONTENT_TYPE_JSON: &str = "application/json";

/// Minimal status body for health checks and deletes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".into(),
        }
    }

    pub fn deleted() -> Self {
        Self {
            status: "deleted".into(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::routes::health,
        crate::presentation::http::controllers::posts::list_posts,
        crate::presentation::http::controllers::posts::get_post_by_slug,
        crate::presentation::http::controllers::search::search_posts,
        crate::presentation::http::controllers::categories::list_categories,
        crate::presentation::http::controllers::categories::get_category,
        crate::presentation::http::controllers::categories::category_posts,
        crate::presentation::http::controllers::authors::list_authors,
        crate::presentation::http::controllers::authors::get_author,
        crate::presentation::http::controllers::authors::author_posts,
        crate::presentation::http::controllers::admin_posts::list_posts,
        crate::presentation::http::controllers::admin_posts::create_post,
        crate::presentation::http::controllers::admin_posts::get_post,
        crate::presentation::http::controllers::admin_posts::update_post,
        crate::presentation::http::controllers::admin_posts::delete_post,
        crate::presentation::http::controllers::admin_posts::import_posts,
        crate::presentation::http::controllers::admin_categories::create_category,
        crate::presentation::http::controllers::admin_categories::import_categories,
        crate::presentation::http::controllers::admin_categories::update_category,
        crate::presentation::http::controllers::admin_categories::delete_category,
        crate::presentation::http::controllers::admin_authors::create_author,
        crate::presentation::http::controllers::admin_authors::import_authors,
        crate::presentation::http::controllers::admin_authors::update_author,
        crate::presentation::http::controllers::admin_authors::delete_author,
        crate::presentation::http::controllers::forms::slug_preview,
        crate::presentation::http::controllers::forms::derive_form
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorBody,
            crate::presentation::http::controllers::admin_posts::CreatePostRequest,
            crate::presentation::http::controllers::admin_posts::UpdatePostRequest,
            crate::presentation::http::controllers::admin_posts::ImportPostRequest,
            crate::presentation::http::controllers::admin_posts::ImportPostsRequest,
            crate::presentation::http::controllers::admin_categories::CreateCategoryRequest,
            crate::presentation::http::controllers::admin_categories::UpdateCategoryRequest,
            crate::presentation::http::controllers::admin_categories::ImportCategoryRequest,
            crate::presentation::http::controllers::admin_authors::CreateAuthorRequest,
            crate::presentation::http::controllers::admin_authors::UpdateAuthorRequest,
            crate::presentation::http::controllers::admin_authors::ImportAuthorRequest,
            crate::presentation::http::controllers::forms::SlugPreviewRequest,
            crate::presentation::http::controllers::forms::FormEventRequest,
            crate::presentation::http::controllers::forms::DeriveFormRequest,
            crate::application::dto::PostDto,
            crate::application::dto::RelatedDto,
            crate::application::dto::CategoryDto,
            crate::application::dto::AuthorDto,
            crate::application::dto::CategoryPostsDto,
            crate::application::dto::AuthorPostsDto,
            crate::application::dto::ImportReportDto,
            crate::application::dto::SlugPreviewDto,
            crate::application::dto::DerivedFormDto,
            crate::domain::form::FormFields,
            crate::domain::form::DerivedField,
            crate::domain::form::FieldMode,
            crate::domain::form::DependentField,
            crate::domain::listing::SortKey
        )
    ),
    tags(
        (name = "Posts", description = "Public post listings, search and detail"),
        (name = "Categories", description = "Public category endpoints"),
        (name = "Authors", description = "Public author endpoints"),
        (name = "Admin", description = "Content management, bearer token required"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Mebel Blog API",
        description = "Furniture blog backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// Serialized document, built once per process.
pub(crate) fn openapi_bytes() -> &'static [u8] {
    static BYTES: OnceLock<Vec<u8>> = OnceLock::new();
    BYTES.get_or_init(|| serde_json::to_vec(&ApiDoc::openapi()).unwrap_or_default())
}

pub(crate) fn openapi_etag() -> &'static str {
    static ETAG: OnceLock<String> = OnceLock::new();
    ETAG.get_or_init(|| compute_etag(openapi_bytes()))
}

/// Quoted FNV-1a hash of `bytes`.
fn compute_etag(bytes: &[u8]) -> String {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let hash = bytes
        .iter()
        .fold(OFFSET_BASIS, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(PRIME));
    format!("\"{hash:x}\"")
}

pub fn write_openapi_snapshot(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &ApiDoc::openapi())?;
    Ok(())
}
