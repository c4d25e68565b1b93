use crate::application::{dto::PostDto, queries::posts::SearchPostsQuery};
use crate::domain::listing::{PageNumber, PageResult};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive text to look for. Blank finds nothing.
    pub q: Option<String>,
    pub page: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching posts, newest first, six per page.", body = PageResult<PostDto>)
    ),
    tag = "Posts"
)]
pub async fn search_posts(
    Extension(state): Extension<HttpState>,
    Query(params): Query<SearchParams>,
) -> HttpResult<Json<PageResult<PostDto>>> {
    let query = SearchPostsQuery {
        page: PageNumber::from_query(params.page.as_deref()),
        query: params.q,
    };

    state
        .services
        .post_queries
        .search_posts(query)
        .await
        .into_http()
        .map(Json)
}
