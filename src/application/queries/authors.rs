use std::sync::Arc;

use super::path_slug;
use crate::{
    application::{
        dto::AuthorDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        author::AuthorRepository,
        listing::{SortKey, sort_key_to_ordering},
    },
};

pub struct AuthorQueryService {
    repo: Arc<dyn AuthorRepository>,
}

impl AuthorQueryService {
    pub const DEFAULT_SORT: SortKey = SortKey::AlphaAscending;

    pub fn new(repo: Arc<dyn AuthorRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_authors(&self, sort: SortKey) -> ApplicationResult<Vec<AuthorDto>> {
        let authors = self.repo.list(sort_key_to_ordering(sort)).await?;
        Ok(authors.into_iter().map(Into::into).collect())
    }

    pub async fn get_author_by_slug(&self, slug: &str) -> ApplicationResult<AuthorDto> {
        let slug = path_slug(slug, "author")?;
        self.repo
            .find_by_slug(&slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("author not found"))
    }
}
