use super::PostQueryService;
use crate::{
    application::{dto::PostDto, error::ApplicationResult},
    domain::listing::{ListingKind, PageNumber, PageResult, PostFilter, SortKey, sort_key_to_ordering},
};

#[derive(Debug, Clone, Default)]
pub struct SearchPostsQuery {
    pub query: Option<String>,
    pub page: PageNumber,
}

impl PostQueryService {
    /// Full-text-ish search over posts, newest first. A blank query yields an
    /// empty page without touching the store.
    pub async fn search_posts(
        &self,
        query: SearchPostsQuery,
    ) -> ApplicationResult<PageResult<PostDto>> {
        let filter = PostFilter::search(query.query.as_deref());
        let page = self
            .fetch_page(
                &filter,
                query.page,
                ListingKind::Search,
                sort_key_to_ordering(SortKey::NewestFirst),
            )
            .await?;
        tracing::debug!(total = page.total, page = page.page, "search served");
        Ok(page)
    }
}
