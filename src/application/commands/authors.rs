use std::sync::Arc;

use super::unique_slug::write_with_unique_slug;
use crate::{
    application::{
        dto::AuthorDto,
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        author::{Author, AuthorId, AuthorName, AuthorRepository, AuthorUpdate, NewAuthor},
        errors::DomainError,
        post::optional_text,
        slug::{Slug, SlugNamespace, SlugService},
    },
};

pub struct CreateAuthorCommand {
    pub name: String,
    pub slug: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// One entry of a bulk author import.
#[derive(Debug, Clone, Default)]
pub struct ImportAuthorItem {
    pub name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// Optional fields left as `None` are untouched; blank strings clear them.
pub struct UpdateAuthorCommand {
    pub id: i64,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

pub struct DeleteAuthorCommand {
    pub id: i64,
}

pub struct AuthorCommandService {
    repo: Arc<dyn AuthorRepository>,
    slug_service: Arc<SlugService>,
    clock: Arc<dyn Clock>,
}

impl AuthorCommandService {
    pub fn new(
        repo: Arc<dyn AuthorRepository>,
        slug_service: Arc<SlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            slug_service,
            clock,
        }
    }

    /// Creates an author, or returns the existing one with the same name.
    pub async fn create_author(&self, command: CreateAuthorCommand) -> ApplicationResult<AuthorDto> {
        let name = AuthorName::new(command.name)?;
        if let Some(existing) = self.repo.find_by_name(&name).await? {
            return Ok(existing.into());
        }
        self.insert_author(
            name,
            command.slug.as_deref(),
            optional_text(command.bio),
            optional_text(command.avatar_url),
        )
        .await
        .map(Into::into)
    }

    /// Find-or-create every listed author. Existing rows, matched by the slug
    /// the name would get, are returned untouched.
    pub async fn import_authors(
        &self,
        items: Vec<ImportAuthorItem>,
    ) -> ApplicationResult<Vec<AuthorDto>> {
        let prepared = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                AuthorName::new(item.name)
                    .map(|name| (name, item.bio, item.avatar_url))
                    .map_err(|err| {
                        ApplicationError::validation(format!(
                            "item {index}: {}",
                            ApplicationError::from(err)
                        ))
                    })
            })
            .collect::<ApplicationResult<Vec<_>>>()?;

        let mut imported = Vec::with_capacity(prepared.len());
        for (name, bio, avatar_url) in prepared {
            let base = self.slug_service.base_slug(None, name.as_str())?;
            let author = match self.repo.find_by_slug(&Slug::new(base)?).await? {
                Some(existing) => existing,
                None => match self.repo.find_by_name(&name).await? {
                    Some(existing) => existing,
                    None => {
                        self.insert_author(name, None, optional_text(bio), optional_text(avatar_url))
                            .await?
                    }
                },
            };
            imported.push(AuthorDto::from(author));
        }

        tracing::info!(count = imported.len(), "author import finished");
        Ok(imported)
    }

    pub(crate) async fn ensure_author(&self, name: &AuthorName) -> ApplicationResult<Author> {
        match self.repo.find_by_name(name).await? {
            Some(existing) => Ok(existing),
            None => self.insert_author(name.clone(), None, None, None).await,
        }
    }

    async fn insert_author(
        &self,
        name: AuthorName,
        manual_slug: Option<&str>,
        bio: Option<String>,
        avatar_url: Option<String>,
    ) -> ApplicationResult<Author> {
        let base = self.slug_service.base_slug(manual_slug, name.as_str())?;
        let now = self.clock.now();
        let inserted = write_with_unique_slug(
            &self.slug_service,
            SlugNamespace::Author,
            &base,
            None,
            |slug| {
                let repo = Arc::clone(&self.repo);
                let new_author = NewAuthor {
                    name: name.clone(),
                    slug,
                    bio: bio.clone(),
                    avatar_url: avatar_url.clone(),
                    created_at: now,
                };
                async move { repo.insert(new_author).await }
            },
        )
        .await;

        // A concurrent writer may have inserted the same name since the lookup.
        let created = match inserted {
            Err(ApplicationError::Domain(DomainError::Conflict(message))) => {
                return match self.repo.find_by_name(&name).await? {
                    Some(existing) => {
                        tracing::debug!(author_id = existing.id.0, "author created concurrently");
                        Ok(existing)
                    }
                    None => Err(DomainError::Conflict(message).into()),
                };
            }
            other => other?,
        };

        tracing::info!(author_id = created.id.0, slug = %created.slug, "author created");
        Ok(created)
    }

    pub async fn update_author(&self, command: UpdateAuthorCommand) -> ApplicationResult<AuthorDto> {
        let id = AuthorId::new(command.id)?;
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("author not found"))?;

        let UpdateAuthorCommand {
            id: _,
            name,
            slug,
            bio,
            avatar_url,
        } = command;

        let name = name.map(AuthorName::new).transpose()?;
        let manual_slug = slug
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        let renamed = name.as_ref().is_some_and(|name| *name != current.name);

        let mut update = AuthorUpdate::new(id);
        if let Some(name) = &name {
            update = update.with_name(name.clone());
        }
        if bio.is_some() {
            update = update.with_bio(optional_text(bio));
        }
        if avatar_url.is_some() {
            update = update.with_avatar_url(optional_text(avatar_url));
        }

        if manual_slug.is_none() && !renamed {
            let updated = self.repo.update(update).await?;
            return Ok(updated.into());
        }

        let source = name.as_ref().unwrap_or(&current.name);
        let base = self.slug_service.base_slug(manual_slug, source.as_str())?;
        let updated = write_with_unique_slug(
            &self.slug_service,
            SlugNamespace::Author,
            &base,
            Some(id.into()),
            |slug| {
                let repo = Arc::clone(&self.repo);
                let update = update.clone().with_slug(slug);
                async move { repo.update(update).await }
            },
        )
        .await?;

        tracing::info!(author_id = updated.id.0, slug = %updated.slug, "author updated");
        Ok(updated.into())
    }

    pub async fn delete_author(&self, command: DeleteAuthorCommand) -> ApplicationResult<()> {
        let id = AuthorId::new(command.id)?;
        self.repo.delete(id).await?;
        tracing::info!(author_id = id.0, "author deleted");
        Ok(())
    }
}
