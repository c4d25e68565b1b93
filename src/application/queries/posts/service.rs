use std::sync::Arc;

use crate::{
    application::{dto::PostDto, error::ApplicationResult},
    domain::{
        author::AuthorRepository,
        category::CategoryRepository,
        listing::{ListingKind, OrderSpec, PageNumber, PageResult, PostFilter, paginate},
        post::PostReadRepository,
    },
};

pub struct PostQueryService {
    pub(super) read_repo: Arc<dyn PostReadRepository>,
    pub(super) categories: Arc<dyn CategoryRepository>,
    pub(super) authors: Arc<dyn AuthorRepository>,
}

impl PostQueryService {
    pub fn new(
        read_repo: Arc<dyn PostReadRepository>,
        categories: Arc<dyn CategoryRepository>,
        authors: Arc<dyn AuthorRepository>,
    ) -> Self {
        Self {
            read_repo,
            categories,
            authors,
        }
    }

    /// Fetch one page of `kind` and wrap it with its page metadata.
    pub(super) async fn fetch_page(
        &self,
        filter: &PostFilter,
        page: PageNumber,
        kind: ListingKind,
        order: OrderSpec,
    ) -> ApplicationResult<PageResult<PostDto>> {
        let page_size = kind.page_size();
        if filter.matches_nothing() {
            return Ok(PageResult::empty(page, page_size));
        }

        let (views, total) = self
            .read_repo
            .fetch_page(filter, page.offset(page_size), page_size, order)
            .await?;
        let window = paginate(page, page_size, total);
        let items = views.into_iter().map(PostDto::from).collect();
        Ok(PageResult::new(items, total, page, window))
    }
}
