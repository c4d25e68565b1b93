use super::PostQueryService;
use crate::{
    application::{dto::PostDto, error::ApplicationResult},
    domain::listing::{
        FilterContext, ListingKind, PageNumber, PageResult, PostFilter, PostScope, SortKey,
        build_filter, sort_key_to_ordering,
    },
};

/// Home page listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListPostsQuery {
    pub page: PageNumber,
    pub sort: SortKey,
}

/// Admin table of posts with an optional text filter.
#[derive(Debug, Clone, Default)]
pub struct AdminPostsQuery {
    pub page: PageNumber,
    pub sort: SortKey,
    pub query: Option<String>,
}

impl PostQueryService {
    pub async fn list_posts(&self, query: ListPostsQuery) -> ApplicationResult<PageResult<PostDto>> {
        self.fetch_page(
            &PostFilter::all(),
            query.page,
            ListingKind::Home,
            sort_key_to_ordering(query.sort),
        )
        .await
    }

    pub async fn list_posts_admin(
        &self,
        query: AdminPostsQuery,
    ) -> ApplicationResult<PageResult<PostDto>> {
        let filter = PostFilter {
            scope: PostScope::All,
            text: build_filter(query.query.as_deref(), FilterContext::Listing),
        };
        self.fetch_page(
            &filter,
            query.page,
            ListingKind::Admin,
            sort_key_to_ordering(query.sort),
        )
        .await
    }
}
