use std::sync::Arc;

use super::{PostCommandService, service::post_content};
use crate::{
    application::{
        commands::unique_slug::write_with_unique_slug,
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        post::{PostId, PostTitle, PostUpdate, optional_text},
        slug::SlugNamespace,
    },
};

/// Partial post update. `None` leaves a field as it is; blank optional
/// text clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostCommand {
    pub id: i64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub author_id: Option<i64>,
    pub author_name: Option<String>,
    pub remove_author: bool,
}

impl PostCommandService {
    pub async fn update_post(&self, command: UpdatePostCommand) -> ApplicationResult<PostDto> {
        let id = PostId::new(command.id)?;
        let current = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        let UpdatePostCommand {
            id: _,
            title,
            subtitle,
            slug,
            content,
            image_url,
            meta_title,
            meta_description,
            category_id,
            category_name,
            author_id,
            author_name,
            remove_author,
        } = command;

        let title = title.map(PostTitle::new).transpose()?;
        let manual_slug = slug
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        let retitled = title.as_ref().is_some_and(|title| *title != current.title);

        let mut update = PostUpdate::new(id, self.clock.now());
        if let Some(title) = &title {
            update = update.with_title(title.clone());
        }
        if let Some(content) = content {
            update = update.with_content(post_content(content)?);
        }
        if subtitle.is_some() {
            update.subtitle = Some(optional_text(subtitle));
        }
        if image_url.is_some() {
            update.image_url = Some(optional_text(image_url));
        }
        if meta_title.is_some() {
            update.meta_title = Some(optional_text(meta_title));
        }
        if meta_description.is_some() {
            update.meta_description = Some(optional_text(meta_description));
        }
        if let Some(category) = self.resolve_category(category_id, category_name).await? {
            update = update.with_category(category.id);
        }
        if remove_author {
            update = update.with_author(None);
        } else if let Some(author) = self.resolve_author(author_id, author_name).await? {
            update = update.with_author(Some(author.id));
        }

        let updated = if manual_slug.is_some() || retitled {
            let source = title.as_ref().unwrap_or(&current.title);
            let base = self.slug_service.base_slug(manual_slug, source.as_str())?;
            write_with_unique_slug(
                &self.slug_service,
                SlugNamespace::Post,
                &base,
                Some(id.into()),
                |slug| {
                    let repo = Arc::clone(&self.write_repo);
                    let update = update.clone().with_slug(slug);
                    async move { repo.update(update).await }
                },
            )
            .await?
        } else {
            self.write_repo.update(update).await?
        };

        tracing::info!(post_id = updated.id.0, slug = %updated.slug, "post updated");
        self.present(updated).await
    }
}
