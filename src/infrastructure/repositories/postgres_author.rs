use super::{map_sqlx, ordering::push_order_by};
use crate::domain::author::{
    Author, AuthorId, AuthorName, AuthorRepository, AuthorUpdate, NewAuthor,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::listing::OrderSpec;
use crate::domain::slug::Slug;
use crate::infrastructure::database::SortCollation;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const AUTHOR_COLUMNS: &str = "id, name, slug, bio, avatar_url, created_at";

#[derive(Clone)]
pub struct PostgresAuthorRepository {
    pool: PgPool,
    collation: SortCollation,
}

impl PostgresAuthorRepository {
    pub fn new(pool: PgPool, collation: SortCollation) -> Self {
        Self { pool, collation }
    }
}

#[derive(Debug, FromRow)]
struct AuthorRow {
    id: i64,
    name: String,
    slug: String,
    bio: Option<String>,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuthorRow> for Author {
    type Error = DomainError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        Ok(Author {
            id: AuthorId::new(row.id)?,
            name: AuthorName::new(row.name)?,
            slug: Slug::new(row.slug)?,
            bio: row.bio,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
        })
    }
}

impl PostgresAuthorRepository {
    async fn find_where(&self, condition: &str, value: &str) -> DomainResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE {condition}"
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Author::try_from).transpose()
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn find_by_id(&self, id: AuthorId) -> DomainResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Author::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Author>> {
        self.find_where("slug = $1", slug.as_str()).await
    }

    async fn find_by_name(&self, name: &AuthorName) -> DomainResult<Option<Author>> {
        self.find_where("lower(name) = lower($1)", name.as_str()).await
    }

    async fn list(&self, order: OrderSpec) -> DomainResult<Vec<Author>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {AUTHOR_COLUMNS} FROM authors"));
        push_order_by(&mut builder, order, "created_at", "name", "id", &self.collation);

        let rows = builder
            .build_query_as::<AuthorRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Author::try_from).collect()
    }

    async fn insert(&self, author: NewAuthor) -> DomainResult<Author> {
        let NewAuthor {
            name,
            slug,
            bio,
            avatar_url,
            created_at,
        } = author;

        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            "INSERT INTO authors (name, slug, bio, avatar_url, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {AUTHOR_COLUMNS}"
        ))
        .bind(name.as_str())
        .bind(slug.as_str())
        .bind(bio)
        .bind(avatar_url)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Author::try_from(row)
    }

    async fn update(&self, update: AuthorUpdate) -> DomainResult<Author> {
        let AuthorUpdate {
            id,
            name,
            slug,
            bio,
            avatar_url,
        } = update;

        // `id = id` keeps the SET list non-empty when nothing else changes.
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE authors SET id = id");
        if let Some(name) = name {
            builder.push(", name = ");
            builder.push_bind(String::from(name));
        }
        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }
        if let Some(bio) = bio {
            builder.push(", bio = ");
            builder.push_bind(bio);
        }
        if let Some(avatar_url) = avatar_url {
            builder.push(", avatar_url = ");
            builder.push_bind(avatar_url);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(format_args!(" RETURNING {AUTHOR_COLUMNS}"));

        let row = builder
            .build_query_as::<AuthorRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("author not found".into()))?;

        Author::try_from(row)
    }

    async fn delete(&self, id: AuthorId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("author not found".into()));
        }
        Ok(())
    }
}
