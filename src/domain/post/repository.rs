use super::entity::{NewPost, Post, PostUpdate, PostView};
use super::value_objects::PostId;
use crate::domain::errors::DomainResult;
use crate::domain::listing::{OrderSpec, PostFilter};
use crate::domain::slug::Slug;
use async_trait::async_trait;

#[async_trait]
pub trait PostWriteRepository: Send + Sync {
    async fn insert(&self, post: NewPost) -> DomainResult<Post>;
    async fn update(&self, update: PostUpdate) -> DomainResult<Post>;
    async fn delete(&self, id: PostId) -> DomainResult<()>;
}

#[async_trait]
pub trait PostReadRepository: Send + Sync {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<PostView>>;
    /// One page of posts matching `filter` plus the total match count.
    /// Offsets past the end yield an empty page.
    async fn fetch_page(
        &self,
        filter: &PostFilter,
        skip: u64,
        take: u32,
        order: OrderSpec,
    ) -> DomainResult<(Vec<PostView>, u64)>;
}
