pub mod authors;
pub mod categories;
pub mod forms;
pub mod posts;

use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::slug::Slug,
};

/// A slug taken from a URL. Malformed values cannot match anything, so they
/// are reported as missing rather than invalid.
pub(crate) fn path_slug(raw: &str, what: &str) -> ApplicationResult<Slug> {
    Slug::new(raw.trim()).map_err(|_| ApplicationError::not_found(format!("{what} not found")))
}
