use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::listing::OrderSpec;
use crate::domain::post::RelatedRef;
use crate::domain::slug::Slug;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthorId(pub i64);

impl AuthorId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("author id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<AuthorId> for i64 {
    fn from(value: AuthorId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_owned();
        if value.is_empty() {
            return Err(DomainError::Validation("author name cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AuthorName> for String {
    fn from(value: AuthorName) -> Self {
        value.0
    }
}

#[derive(Debug, Clone)]
pub struct Author {
    pub id: AuthorId,
    pub name: AuthorName,
    pub slug: Slug,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub name: AuthorName,
    pub slug: Slug,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial author update. `Some(None)` clears an optional field.
#[derive(Debug, Clone)]
pub struct AuthorUpdate {
    pub id: AuthorId,
    pub name: Option<AuthorName>,
    pub slug: Option<Slug>,
    pub bio: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
}

impl AuthorUpdate {
    pub fn new(id: AuthorId) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            bio: None,
            avatar_url: None,
        }
    }

    pub fn with_name(mut self, name: AuthorName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_bio(mut self, bio: Option<String>) -> Self {
        self.bio = Some(bio);
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: Option<String>) -> Self {
        self.avatar_url = Some(avatar_url);
        self
    }
}

impl From<&Author> for RelatedRef {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.into(),
            name: author.name.to_string(),
            slug: author.slug.to_string(),
        }
    }
}

#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn find_by_id(&self, id: AuthorId) -> DomainResult<Option<Author>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Author>>;
    /// Case-insensitive exact match on the display name.
    async fn find_by_name(&self, name: &AuthorName) -> DomainResult<Option<Author>>;
    async fn list(&self, order: OrderSpec) -> DomainResult<Vec<Author>>;
    async fn insert(&self, author: NewAuthor) -> DomainResult<Author>;
    async fn update(&self, update: AuthorUpdate) -> DomainResult<Author>;
    async fn delete(&self, id: AuthorId) -> DomainResult<()>;
}
