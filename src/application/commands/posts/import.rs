use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{PostCommandService, service::PostDraft};
use crate::{
    application::{
        commands::unique_slug::write_with_unique_slug,
        dto::{ImportReportDto, PostDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        author::AuthorName,
        category::CategoryName,
        post::{PostTitle, PostUpdate, RelatedRef, optional_text},
        slug::{Slug, SlugNamespace},
    },
};

/// One post of a bulk import. Category and author are referenced by name
/// and created when missing. Unlike a single create, empty content is
/// accepted.
#[derive(Debug, Clone, Default)]
pub struct ImportPostItem {
    pub title: String,
    pub subtitle: Option<String>,
    pub slug: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub category: String,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

struct PreparedItem {
    title: PostTitle,
    base_slug: String,
    content: String,
    category: CategoryName,
    author: Option<AuthorName>,
    item: ImportPostItem,
}

impl PostCommandService {
    /// Import posts in order. A post whose base slug already exists is
    /// updated in place; anything else is created.
    ///
    /// Every item is validated before the first write, so a malformed
    /// batch changes nothing.
    pub async fn import_posts(
        &self,
        items: Vec<ImportPostItem>,
    ) -> ApplicationResult<ImportReportDto> {
        let prepared = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                self.prepare(item)
                    .map_err(|err| ApplicationError::validation(format!("item {index}: {err}")))
            })
            .collect::<ApplicationResult<Vec<_>>>()?;

        let mut report = ImportReportDto {
            created: 0,
            updated: 0,
            posts: Vec::with_capacity(prepared.len()),
        };

        for item in prepared {
            let (post, created) = self.import_one(item).await?;
            if created {
                report.created += 1;
            } else {
                report.updated += 1;
            }
            report.posts.push(post);
        }

        tracing::info!(
            created = report.created,
            updated = report.updated,
            "post import finished"
        );
        Ok(report)
    }

    fn prepare(&self, item: ImportPostItem) -> ApplicationResult<PreparedItem> {
        let title = PostTitle::new(item.title.clone())?;
        let content = item.content.clone();
        let category = CategoryName::new(item.category.clone())?;
        let author = optional_text(item.author.clone())
            .map(AuthorName::new)
            .transpose()?;
        let base_slug = self
            .slug_service
            .base_slug(item.slug.as_deref(), title.as_str())?;
        Ok(PreparedItem {
            title,
            base_slug,
            content,
            category,
            author,
            item,
        })
    }

    async fn import_one(&self, prepared: PreparedItem) -> ApplicationResult<(PostDto, bool)> {
        let PreparedItem {
            title,
            base_slug,
            content,
            category,
            author,
            item,
        } = prepared;

        let category = self.category_commands.ensure_category(&category, None).await?;
        let author = match &author {
            Some(name) => Some(self.author_commands.ensure_author(name).await?),
            None => None,
        };
        let now = self.clock.now();

        let existing = self.read_repo.find_by_slug(&Slug::new(base_slug.clone())?).await?;
        let (post, created) = if let Some(existing) = existing {
            let mut update = PostUpdate::new(existing.post.id, now)
                .with_title(title)
                .with_content(content)
                .with_category(category.id)
                .with_author(author.as_ref().map(|author| author.id));
            update.subtitle = Some(optional_text(item.subtitle));
            update.image_url = Some(optional_text(item.image_url));
            update.meta_title = Some(optional_text(item.meta_title));
            update.meta_description = Some(optional_text(item.meta_description));
            (self.write_repo.update(update).await?, false)
        } else {
            let draft = PostDraft {
                title,
                subtitle: optional_text(item.subtitle),
                content,
                image_url: optional_text(item.image_url),
                meta_title: optional_text(item.meta_title),
                meta_description: optional_text(item.meta_description),
                category_id: category.id,
                author_id: author.as_ref().map(|author| author.id),
                published_at: item.published_at.unwrap_or(now),
                created_at: now,
            };
            let inserted = write_with_unique_slug(
                &self.slug_service,
                SlugNamespace::Post,
                &base_slug,
                None,
                |slug| {
                    let repo = Arc::clone(&self.write_repo);
                    let new_post = draft.with_slug(slug);
                    async move { repo.insert(new_post).await }
                },
            )
            .await?;
            (inserted, true)
        };

        tracing::debug!(post_id = post.id.0, slug = %post.slug, created, "post imported");
        let dto = PostDto::from_parts(
            post,
            RelatedRef::from(&category),
            author.as_ref().map(RelatedRef::from),
        );
        Ok((dto, created))
    }
}
