use std::sync::Arc;

use super::path_slug;
use crate::{
    application::{
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        category::CategoryRepository,
        listing::{SortKey, sort_key_to_ordering},
    },
};

pub struct CategoryQueryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryQueryService {
    /// Category lists are alphabetical unless asked otherwise.
    pub const DEFAULT_SORT: SortKey = SortKey::AlphaAscending;

    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_categories(&self, sort: SortKey) -> ApplicationResult<Vec<CategoryDto>> {
        let categories = self.repo.list(sort_key_to_ordering(sort)).await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn get_category_by_slug(&self, slug: &str) -> ApplicationResult<CategoryDto> {
        let slug = path_slug(slug, "category")?;
        self.repo
            .find_by_slug(&slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("category not found"))
    }
}
