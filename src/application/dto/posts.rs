use super::{AuthorDto, CategoryDto};
use crate::domain::listing::PageResult;
use crate::domain::post::{Post, PostView, RelatedRef};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RelatedDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<RelatedRef> for RelatedDto {
    fn from(value: RelatedRef) -> Self {
        Self {
            id: value.id,
            name: value.name,
            slug: value.slug,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub slug: String,
    pub content: String,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub category: RelatedDto,
    pub author: Option<RelatedDto>,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostDto {
    pub fn from_parts(post: Post, category: RelatedRef, author: Option<RelatedRef>) -> Self {
        Self {
            id: post.id.into(),
            title: post.title.into(),
            subtitle: post.subtitle,
            slug: post.slug.into(),
            content: post.content,
            image_url: post.image_url,
            meta_title: post.meta_title,
            meta_description: post.meta_description,
            category: category.into(),
            author: author.map(Into::into),
            published_at: post.published_at,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<PostView> for PostDto {
    fn from(view: PostView) -> Self {
        Self::from_parts(view.post, view.category, view.author)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryPostsDto {
    pub category: CategoryDto,
    pub posts: PageResult<PostDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorPostsDto {
    pub author: AuthorDto,
    pub posts: PageResult<PostDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImportReportDto {
    pub created: usize,
    pub updated: usize,
    pub posts: Vec<PostDto>,
}
