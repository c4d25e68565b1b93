// src/presentation/http/controllers/mod.rs
pub mod admin_authors;
pub mod admin_categories;
pub mod admin_posts;
pub mod authors;
pub mod categories;
pub mod forms;
pub mod posts;
pub mod search;

use crate::domain::{
    errors::DomainResult,
    listing::{PageNumber, SortKey},
};
use serde::Deserialize;
use utoipa::IntoParams;

/// `?page=&sort=` as sent by the public pages. Both are kept as raw strings
/// so a malformed page number falls back to the first page instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingParams {
    /// One-based page number.
    pub page: Option<String>,
    /// `newest-first`, `oldest-first`, `alpha-ascending` or `alpha-descending`.
    pub sort: Option<String>,
}

impl ListingParams {
    pub fn page(&self) -> PageNumber {
        PageNumber::from_query(self.page.as_deref())
    }

    pub fn sort_or(&self, default: SortKey) -> DomainResult<SortKey> {
        SortKey::from_query(self.sort.as_deref(), default)
    }
}
