use super::{map_sqlx, ordering::push_order_by};
use crate::domain::author::AuthorId;
use crate::domain::category::CategoryId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::listing::{OrderSpec, PostFilter, PostScope, TextFilter, like_pattern};
use crate::domain::post::{
    NewPost, Post, PostId, PostReadRepository, PostTitle, PostUpdate, PostView,
    PostWriteRepository, RelatedRef,
};
use crate::domain::slug::Slug;
use crate::infrastructure::database::SortCollation;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const POST_COLUMNS: &str = "id, title, subtitle, slug, content, image_url, meta_title, \
     meta_description, category_id, author_id, published_at, created_at, updated_at";

const VIEW_SELECT: &str = "SELECT p.id, p.title, p.subtitle, p.slug, p.content, p.image_url, \
     p.meta_title, p.meta_description, p.category_id, p.author_id, p.published_at, \
     p.created_at, p.updated_at, c.name AS category_name, c.slug AS category_slug, \
     a.name AS author_name, a.slug AS author_slug";

const VIEW_FROM: &str = " FROM posts p \
     JOIN categories c ON c.id = p.category_id \
     LEFT JOIN authors a ON a.id = p.author_id";

#[derive(Clone)]
pub struct PostgresPostWriteRepository {
    pool: PgPool,
}

impl PostgresPostWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresPostReadRepository {
    pool: PgPool,
    collation: SortCollation,
}

impl PostgresPostReadRepository {
    pub fn new(pool: PgPool, collation: SortCollation) -> Self {
        Self { pool, collation }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    subtitle: Option<String>,
    slug: String,
    content: String,
    image_url: Option<String>,
    meta_title: Option<String>,
    meta_description: Option<String>,
    category_id: i64,
    author_id: Option<i64>,
    published_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: PostId::new(row.id)?,
            title: PostTitle::new(row.title)?,
            subtitle: row.subtitle,
            slug: Slug::new(row.slug)?,
            content: row.content,
            image_url: row.image_url,
            meta_title: row.meta_title,
            meta_description: row.meta_description,
            category_id: CategoryId::new(row.category_id)?,
            author_id: row.author_id.map(AuthorId::new).transpose()?,
            published_at: row.published_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct PostViewRow {
    #[sqlx(flatten)]
    post: PostRow,
    category_name: String,
    category_slug: String,
    author_name: Option<String>,
    author_slug: Option<String>,
}

impl TryFrom<PostViewRow> for PostView {
    type Error = DomainError;

    fn try_from(row: PostViewRow) -> Result<Self, Self::Error> {
        let category = RelatedRef {
            id: row.post.category_id,
            name: row.category_name,
            slug: row.category_slug,
        };
        let author = match (row.post.author_id, row.author_name, row.author_slug) {
            (Some(id), Some(name), Some(slug)) => Some(RelatedRef { id, name, slug }),
            _ => None,
        };
        Ok(PostView {
            post: Post::try_from(row.post)?,
            category,
            author,
        })
    }
}

#[async_trait]
impl PostWriteRepository for PostgresPostWriteRepository {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let NewPost {
            title,
            subtitle,
            slug,
            content,
            image_url,
            meta_title,
            meta_description,
            category_id,
            author_id,
            published_at,
            created_at,
        } = post;

        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO posts (title, subtitle, slug, content, image_url, meta_title,
                 meta_description, category_id, author_id, published_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
             RETURNING {POST_COLUMNS}"
        ))
        .bind(title.as_str())
        .bind(subtitle)
        .bind(slug.as_str())
        .bind(content)
        .bind(image_url)
        .bind(meta_title)
        .bind(meta_description)
        .bind(i64::from(category_id))
        .bind(author_id.map(i64::from))
        .bind(published_at)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Post::try_from(row)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        let PostUpdate {
            id,
            title,
            subtitle,
            slug,
            content,
            image_url,
            meta_title,
            meta_description,
            category_id,
            author_id,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE posts SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(String::from(title));
        }
        if let Some(subtitle) = subtitle {
            builder.push(", subtitle = ");
            builder.push_bind(subtitle);
        }
        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }
        if let Some(content) = content {
            builder.push(", content = ");
            builder.push_bind(content);
        }
        if let Some(image_url) = image_url {
            builder.push(", image_url = ");
            builder.push_bind(image_url);
        }
        if let Some(meta_title) = meta_title {
            builder.push(", meta_title = ");
            builder.push_bind(meta_title);
        }
        if let Some(meta_description) = meta_description {
            builder.push(", meta_description = ");
            builder.push_bind(meta_description);
        }
        if let Some(category_id) = category_id {
            builder.push(", category_id = ");
            builder.push_bind(i64::from(category_id));
        }
        if let Some(author_id) = author_id {
            builder.push(", author_id = ");
            builder.push_bind(author_id.map(i64::from));
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(format_args!(" RETURNING {POST_COLUMNS}"));

        let row = builder
            .build_query_as::<PostRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("post not found".into()))?;

        Post::try_from(row)
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("post not found".into()));
        }
        Ok(())
    }
}

impl PostgresPostReadRepository {
    fn apply_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &PostFilter) {
        builder.push(" WHERE TRUE");

        match filter.scope {
            PostScope::All => {}
            PostScope::Category(category_id) => {
                builder.push(" AND p.category_id = ");
                builder.push_bind(i64::from(category_id));
            }
            PostScope::Author(author_id) => {
                builder.push(" AND p.author_id = ");
                builder.push_bind(i64::from(author_id));
            }
        }

        match &filter.text {
            TextFilter::Unfiltered => {}
            TextFilter::MatchNothing => {
                builder.push(" AND FALSE");
            }
            TextFilter::Contains(needle) => {
                let pattern = like_pattern(needle);
                let columns = [
                    "p.title",
                    "COALESCE(p.subtitle, '')",
                    "p.content",
                    "COALESCE(a.name, '')",
                ];
                builder.push(" AND (");
                for (index, column) in columns.into_iter().enumerate() {
                    if index > 0 {
                        builder.push(" OR ");
                    }
                    builder.push(format_args!("{column} ILIKE "));
                    builder.push_bind(pattern.clone());
                    builder.push(" ESCAPE '\\'");
                }
                builder.push(")");
            }
        }
    }

    async fn count(&self, filter: &PostFilter) -> DomainResult<u64> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT COUNT(*){VIEW_FROM}"));
        Self::apply_filter(&mut builder, filter);

        let total: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}

#[async_trait]
impl PostReadRepository for PostgresPostReadRepository {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Post::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<PostView>> {
        let row = sqlx::query_as::<_, PostViewRow>(&format!(
            "{VIEW_SELECT}{VIEW_FROM} WHERE p.slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(PostView::try_from).transpose()
    }

    async fn fetch_page(
        &self,
        filter: &PostFilter,
        skip: u64,
        take: u32,
        order: OrderSpec,
    ) -> DomainResult<(Vec<PostView>, u64)> {
        let total = self.count(filter).await?;
        if total == 0 || skip >= total {
            return Ok((Vec::new(), total));
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("{VIEW_SELECT}{VIEW_FROM}"));
        Self::apply_filter(&mut builder, filter);
        push_order_by(
            &mut builder,
            order,
            "p.published_at",
            "p.title",
            "p.id",
            &self.collation,
        );
        builder.push(" OFFSET ");
        builder.push_bind(i64::try_from(skip).unwrap_or(i64::MAX));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(take));

        let rows = builder
            .build_query_as::<PostViewRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let views = rows
            .into_iter()
            .map(PostView::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok((views, total))
    }
}
