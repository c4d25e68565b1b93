use super::value_objects::{PostId, PostTitle};
use crate::domain::author::AuthorId;
use crate::domain::category::CategoryId;
use crate::domain::slug::Slug;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub subtitle: Option<String>,
    pub slug: Slug,
    pub content: String,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub category_id: CategoryId,
    pub author_id: Option<AuthorId>,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal projection of a related category or author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedRef {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// A post together with the display data of its category and author.
#[derive(Debug, Clone)]
pub struct PostView {
    pub post: Post,
    pub category: RelatedRef,
    pub author: Option<RelatedRef>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub subtitle: Option<String>,
    pub slug: Slug,
    pub content: String,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub category_id: CategoryId,
    pub author_id: Option<AuthorId>,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Partial post update. `Some(None)` clears an optional column.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub id: PostId,
    pub title: Option<PostTitle>,
    pub subtitle: Option<Option<String>>,
    pub slug: Option<Slug>,
    pub content: Option<String>,
    pub image_url: Option<Option<String>>,
    pub meta_title: Option<Option<String>>,
    pub meta_description: Option<Option<String>>,
    pub category_id: Option<CategoryId>,
    pub author_id: Option<Option<AuthorId>>,
    pub updated_at: DateTime<Utc>,
}

impl PostUpdate {
    pub fn new(id: PostId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            subtitle: None,
            slug: None,
            content: None,
            image_url: None,
            meta_title: None,
            meta_description: None,
            category_id: None,
            author_id: None,
            updated_at,
        }
    }

    pub fn with_title(mut self, title: PostTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_author(mut self, author_id: Option<AuthorId>) -> Self {
        self.author_id = Some(author_id);
        self
    }

    /// Apply this update to an in-memory copy of the post.
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(subtitle) = &self.subtitle {
            post.subtitle.clone_from(subtitle);
        }
        if let Some(slug) = &self.slug {
            post.slug = slug.clone();
        }
        if let Some(content) = &self.content {
            post.content.clone_from(content);
        }
        if let Some(image_url) = &self.image_url {
            post.image_url.clone_from(image_url);
        }
        if let Some(meta_title) = &self.meta_title {
            post.meta_title.clone_from(meta_title);
        }
        if let Some(meta_description) = &self.meta_description {
            post.meta_description.clone_from(meta_description);
        }
        if let Some(category_id) = self.category_id {
            post.category_id = category_id;
        }
        if let Some(author_id) = self.author_id {
            post.author_id = author_id;
        }
        post.updated_at = self.updated_at;
    }
}
