use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{
    PostCommandService,
    service::{PostDraft, post_content},
};
use crate::{
    application::{
        commands::unique_slug::write_with_unique_slug,
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        post::{PostTitle, RelatedRef, optional_text},
        slug::SlugNamespace,
    },
};

/// A new post. The category is required, given by id or by name; the
/// author is optional and resolved the same way.
#[derive(Debug, Clone, Default)]
pub struct CreatePostCommand {
    pub title: String,
    pub subtitle: Option<String>,
    pub slug: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub author_id: Option<i64>,
    pub author_name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl PostCommandService {
    pub async fn create_post(&self, command: CreatePostCommand) -> ApplicationResult<PostDto> {
        let title = PostTitle::new(command.title)?;
        let content = post_content(command.content)?;
        let base = self
            .slug_service
            .base_slug(command.slug.as_deref(), title.as_str())?;

        let category = self
            .resolve_category(command.category_id, command.category_name)
            .await?
            .ok_or_else(|| ApplicationError::validation("category is required"))?;
        let author = self
            .resolve_author(command.author_id, command.author_name)
            .await?;

        let now = self.clock.now();
        let draft = PostDraft {
            title,
            subtitle: optional_text(command.subtitle),
            content,
            image_url: optional_text(command.image_url),
            meta_title: optional_text(command.meta_title),
            meta_description: optional_text(command.meta_description),
            category_id: category.id,
            author_id: author.as_ref().map(|author| author.id),
            published_at: command.published_at.unwrap_or(now),
            created_at: now,
        };

        let created = write_with_unique_slug(
            &self.slug_service,
            SlugNamespace::Post,
            &base,
            None,
            |slug| {
                let repo = Arc::clone(&self.write_repo);
                let new_post = draft.with_slug(slug);
                async move { repo.insert(new_post).await }
            },
        )
        .await?;

        tracing::info!(
            post_id = created.id.0,
            slug = %created.slug,
            category_id = category.id.0,
            "post created"
        );
        Ok(PostDto::from_parts(
            created,
            RelatedRef::from(&category),
            author.as_ref().map(RelatedRef::from),
        ))
    }
}
