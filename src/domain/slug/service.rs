use std::sync::Arc;

use super::{Slug, SlugNamespace, SlugRepository, resolve_unique, sanitize};
use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::{DomainError, DomainResult};

/// Domain service responsible for producing namespace-unique slugs.
pub struct SlugService {
    repo: Arc<dyn SlugRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl SlugService {
    pub fn new(repo: Arc<dyn SlugRepository>, generator: Arc<dyn SlugGenerator>) -> Self {
        Self { repo, generator }
    }

    /// Base slug for an entity: a manual slug wins over the source name.
    pub fn base_slug(&self, manual: Option<&str>, name: &str) -> DomainResult<String> {
        let source = manual
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(name);
        let base = sanitize(&self.generator.slugify(source));
        if base.is_empty() {
            return Err(DomainError::Validation(format!(
                "could not derive a slug from {source:?}"
            )));
        }
        Ok(base)
    }

    pub async fn resolve(
        &self,
        namespace: SlugNamespace,
        base: &str,
        exclude_id: Option<i64>,
    ) -> DomainResult<Slug> {
        let value = resolve_unique(base, |candidate| {
            let repo = Arc::clone(&self.repo);
            async move {
                repo.exists_by_slug(namespace, &candidate, exclude_id)
                    .await
            }
        })
        .await?;
        Slug::new(value)
    }

    pub async fn generate(
        &self,
        namespace: SlugNamespace,
        manual: Option<&str>,
        name: &str,
        exclude_id: Option<i64>,
    ) -> DomainResult<Slug> {
        let base = self.base_slug(manual, name)?;
        self.resolve(namespace, &base, exclude_id).await
    }
}
