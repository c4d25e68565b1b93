use super::SlugNamespace;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait SlugRepository: Send + Sync {
    /// Whether `candidate` is used by a live entity of `namespace`, ignoring
    /// the row identified by `exclude_id`.
    async fn exists_by_slug(
        &self,
        namespace: SlugNamespace,
        candidate: &str,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool>;
}
