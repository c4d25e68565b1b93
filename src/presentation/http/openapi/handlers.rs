use axum::{
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};

/// GET handler for the OpenAPI document. Answers `304 Not Modified` when the
/// client already holds the current version.
pub async fn serve_openapi(headers: HeaderMap) -> Response {
    let etag = super::openapi_etag();
    if if_none_match(&headers, etag) {
        return (StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response();
    }

    (
        StatusCode::OK,
        [
            (header::ETAG, etag),
            (header::CONTENT_TYPE, super::OPENAPI_CONTENT_TYPE_JSON),
        ],
        super::openapi_bytes(),
    )
        .into_response()
}

/// Weak comparison of every tag in `If-None-Match` against `etag`.
pub(super) fn if_none_match(headers: &HeaderMap, etag: &str) -> bool {
    let Some(value) = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };
    value
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == "*" || strip_weak(candidate) == strip_weak(etag))
}

fn strip_weak(tag: &str) -> &str {
    tag.strip_prefix("W/")
        .or_else(|| tag.strip_prefix("w/"))
        .unwrap_or(tag)
}
