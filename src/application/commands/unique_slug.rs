use std::future::Future;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{Slug, SlugNamespace, SlugService};

const MAX_SLUG_ATTEMPTS: u32 = 3;

/// Resolve a free slug and run `write` with it.
///
/// The UNIQUE constraint on the slug column is the real guard. When a
/// concurrent writer takes the slug between the lookup and the write, the
/// lookup is repeated and the write retried.
pub(crate) async fn write_with_unique_slug<T, F, Fut>(
    slugs: &SlugService,
    namespace: SlugNamespace,
    base: &str,
    exclude_id: Option<i64>,
    mut write: F,
) -> ApplicationResult<T>
where
    F: FnMut(Slug) -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    for attempt in 1..=MAX_SLUG_ATTEMPTS {
        let slug = slugs.resolve(namespace, base, exclude_id).await?;
        match write(slug.clone()).await {
            Err(DomainError::SlugTaken(_)) => {
                tracing::warn!(%namespace, %slug, attempt, "slug taken by a concurrent write");
            }
            other => return other.map_err(ApplicationError::from),
        }
    }

    Err(ApplicationError::conflict(format!(
        "could not reserve a unique {namespace} slug for {base:?}"
    )))
}
