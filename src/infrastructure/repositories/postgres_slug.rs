use super::map_sqlx;
use crate::domain::errors::DomainResult;
use crate::domain::slug::{SlugNamespace, SlugRepository};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostgresSlugRepository {
    pool: PgPool,
}

impl PostgresSlugRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table(namespace: SlugNamespace) -> &'static str {
    match namespace {
        SlugNamespace::Post => "posts",
        SlugNamespace::Author => "authors",
        SlugNamespace::Category => "categories",
    }
}

#[async_trait]
impl SlugRepository for PostgresSlugRepository {
    async fn exists_by_slug(
        &self,
        namespace: SlugNamespace,
        candidate: &str,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
            table(namespace)
        );
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(candidate)
            .bind(exclude_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}
