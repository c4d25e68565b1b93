use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    application::{
        commands::{authors::AuthorCommandService, categories::CategoryCommandService},
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        author::{Author, AuthorId, AuthorName, AuthorRepository},
        category::{Category, CategoryId, CategoryName, CategoryRepository},
        post::{NewPost, Post, PostReadRepository, PostTitle, PostWriteRepository, RelatedRef},
        slug::{Slug, SlugService},
    },
};

pub struct PostCommandService {
    pub(super) write_repo: Arc<dyn PostWriteRepository>,
    pub(super) read_repo: Arc<dyn PostReadRepository>,
    pub(super) categories: Arc<dyn CategoryRepository>,
    pub(super) authors: Arc<dyn AuthorRepository>,
    pub(super) category_commands: Arc<CategoryCommandService>,
    pub(super) author_commands: Arc<AuthorCommandService>,
    pub(super) slug_service: Arc<SlugService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl PostCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        write_repo: Arc<dyn PostWriteRepository>,
        read_repo: Arc<dyn PostReadRepository>,
        categories: Arc<dyn CategoryRepository>,
        authors: Arc<dyn AuthorRepository>,
        category_commands: Arc<CategoryCommandService>,
        author_commands: Arc<AuthorCommandService>,
        slug_service: Arc<SlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            categories,
            authors,
            category_commands,
            author_commands,
            slug_service,
            clock,
        }
    }

    /// Category given either by id or by name. A name creates the category
    /// when it does not exist yet.
    pub(super) async fn resolve_category(
        &self,
        id: Option<i64>,
        name: Option<String>,
    ) -> ApplicationResult<Option<Category>> {
        if let Some(id) = id {
            let category = self
                .categories
                .find_by_id(CategoryId::new(id)?)
                .await?
                .ok_or_else(|| ApplicationError::not_found("category not found"))?;
            return Ok(Some(category));
        }
        match name.filter(|value| !value.trim().is_empty()) {
            Some(name) => {
                let name = CategoryName::new(name)?;
                self.category_commands
                    .ensure_category(&name, None)
                    .await
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    pub(super) async fn resolve_author(
        &self,
        id: Option<i64>,
        name: Option<String>,
    ) -> ApplicationResult<Option<Author>> {
        if let Some(id) = id {
            let author = self
                .authors
                .find_by_id(AuthorId::new(id)?)
                .await?
                .ok_or_else(|| ApplicationError::not_found("author not found"))?;
            return Ok(Some(author));
        }
        match name.filter(|value| !value.trim().is_empty()) {
            Some(name) => {
                let name = AuthorName::new(name)?;
                self.author_commands.ensure_author(&name).await.map(Some)
            }
            None => Ok(None),
        }
    }

    /// Load the category and author of a stored post for the response.
    pub(super) async fn present(&self, post: Post) -> ApplicationResult<PostDto> {
        let category = self
            .categories
            .find_by_id(post.category_id)
            .await?
            .ok_or_else(|| ApplicationError::infrastructure("post references a missing category"))?;
        let author = match post.author_id {
            Some(author_id) => self.authors.find_by_id(author_id).await?,
            None => None,
        };
        Ok(PostDto::from_parts(
            post,
            RelatedRef::from(&category),
            author.as_ref().map(RelatedRef::from),
        ))
    }
}

/// Everything needed to insert a post except its slug.
#[derive(Debug, Clone)]
pub(super) struct PostDraft {
    pub title: PostTitle,
    pub subtitle: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub category_id: CategoryId,
    pub author_id: Option<AuthorId>,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PostDraft {
    pub fn with_slug(&self, slug: Slug) -> NewPost {
        NewPost {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            slug,
            content: self.content.clone(),
            image_url: self.image_url.clone(),
            meta_title: self.meta_title.clone(),
            meta_description: self.meta_description.clone(),
            category_id: self.category_id,
            author_id: self.author_id,
            published_at: self.published_at,
            created_at: self.created_at,
        }
    }
}

pub(super) fn post_content(value: String) -> ApplicationResult<String> {
    if value.trim().is_empty() {
        return Err(ApplicationError::validation("content cannot be empty"));
    }
    Ok(value)
}
