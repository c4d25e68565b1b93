use super::PostQueryService;
use crate::{
    application::{
        dto::{AuthorPostsDto, CategoryPostsDto},
        error::{ApplicationError, ApplicationResult},
        queries::path_slug,
    },
    domain::listing::{
        ListingKind, PageNumber, PostFilter, PostScope, SortKey, sort_key_to_ordering,
    },
};

#[derive(Debug, Clone, Default)]
pub struct CategoryPostsQuery {
    pub slug: String,
    pub page: PageNumber,
    pub sort: SortKey,
}

#[derive(Debug, Clone, Default)]
pub struct AuthorPostsQuery {
    pub slug: String,
    pub page: PageNumber,
    pub sort: SortKey,
}

impl PostQueryService {
    pub async fn category_posts(
        &self,
        query: CategoryPostsQuery,
    ) -> ApplicationResult<CategoryPostsDto> {
        let slug = path_slug(&query.slug, "category")?;
        let category = self
            .categories
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;

        let posts = self
            .fetch_page(
                &PostFilter::scoped(PostScope::Category(category.id)),
                query.page,
                ListingKind::Category,
                sort_key_to_ordering(query.sort),
            )
            .await?;

        Ok(CategoryPostsDto {
            category: category.into(),
            posts,
        })
    }

    pub async fn author_posts(&self, query: AuthorPostsQuery) -> ApplicationResult<AuthorPostsDto> {
        let slug = path_slug(&query.slug, "author")?;
        let author = self
            .authors
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("author not found"))?;

        let posts = self
            .fetch_page(
                &PostFilter::scoped(PostScope::Author(author.id)),
                query.page,
                ListingKind::Author,
                sort_key_to_ordering(query.sort),
            )
            .await?;

        Ok(AuthorPostsDto {
            author: author.into(),
            posts,
        })
    }
}
