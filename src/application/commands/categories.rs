use std::sync::Arc;

use super::unique_slug::write_with_unique_slug;
use crate::{
    application::{
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        category::{Category, CategoryId, CategoryName, CategoryRepository, CategoryUpdate, NewCategory},
        errors::DomainError,
        slug::{Slug, SlugNamespace, SlugService},
    },
};

pub struct CreateCategoryCommand {
    pub name: String,
    pub slug: Option<String>,
}

/// One entry of a bulk category import.
#[derive(Debug, Clone, Default)]
pub struct ImportCategoryItem {
    pub name: String,
}

pub struct UpdateCategoryCommand {
    pub id: i64,
    pub name: Option<String>,
    pub slug: Option<String>,
}

pub struct DeleteCategoryCommand {
    pub id: i64,
}

pub struct CategoryCommandService {
    repo: Arc<dyn CategoryRepository>,
    slug_service: Arc<SlugService>,
    clock: Arc<dyn Clock>,
}

impl CategoryCommandService {
    pub fn new(
        repo: Arc<dyn CategoryRepository>,
        slug_service: Arc<SlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            slug_service,
            clock,
        }
    }

    /// Creates a category, or returns the existing one with the same name.
    pub async fn create_category(
        &self,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let name = CategoryName::new(command.name)?;
        self.ensure_category(&name, command.slug.as_deref())
            .await
            .map(Into::into)
    }

    /// Find-or-create every named category, matching existing rows by the
    /// slug the name would get. All names are checked before the first
    /// write.
    pub async fn import_categories(
        &self,
        items: Vec<ImportCategoryItem>,
    ) -> ApplicationResult<Vec<CategoryDto>> {
        let names = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                CategoryName::new(item.name).map_err(|err| {
                    ApplicationError::validation(format!(
                        "item {index}: {}",
                        ApplicationError::from(err)
                    ))
                })
            })
            .collect::<ApplicationResult<Vec<_>>>()?;

        let mut imported = Vec::with_capacity(names.len());
        for name in &names {
            let base = self.slug_service.base_slug(None, name.as_str())?;
            let category = match self.repo.find_by_slug(&Slug::new(base)?).await? {
                Some(existing) => existing,
                None => self.ensure_category(name, None).await?,
            };
            imported.push(CategoryDto::from(category));
        }

        tracing::info!(count = imported.len(), "category import finished");
        Ok(imported)
    }

    pub(crate) async fn ensure_category(
        &self,
        name: &CategoryName,
        manual_slug: Option<&str>,
    ) -> ApplicationResult<Category> {
        if let Some(existing) = self.repo.find_by_name(name).await? {
            return Ok(existing);
        }

        let base = self.slug_service.base_slug(manual_slug, name.as_str())?;
        let now = self.clock.now();
        let inserted = write_with_unique_slug(
            &self.slug_service,
            SlugNamespace::Category,
            &base,
            None,
            |slug| {
                let repo = Arc::clone(&self.repo);
                let new_category = NewCategory {
                    name: name.clone(),
                    slug,
                    created_at: now,
                };
                async move { repo.insert(new_category).await }
            },
        )
        .await;

        // A concurrent writer may have inserted the same name since the lookup.
        let created = match inserted {
            Err(ApplicationError::Domain(DomainError::Conflict(message))) => {
                return match self.repo.find_by_name(name).await? {
                    Some(existing) => {
                        tracing::debug!(category_id = existing.id.0, "category created concurrently");
                        Ok(existing)
                    }
                    None => Err(DomainError::Conflict(message).into()),
                };
            }
            other => other?,
        };

        tracing::info!(category_id = created.id.0, slug = %created.slug, "category created");
        Ok(created)
    }

    pub async fn update_category(
        &self,
        command: UpdateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let id = CategoryId::new(command.id)?;
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;

        let name = command.name.map(CategoryName::new).transpose()?;
        let manual_slug = command
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        let renamed = name.as_ref().is_some_and(|name| *name != current.name);

        let mut update = CategoryUpdate::new(id);
        if let Some(name) = &name {
            update = update.with_name(name.clone());
        }

        if manual_slug.is_none() && !renamed {
            if update.is_empty() {
                return Ok(current.into());
            }
            let updated = self.repo.update(update).await?;
            return Ok(updated.into());
        }

        let source = name.as_ref().unwrap_or(&current.name);
        let base = self.slug_service.base_slug(manual_slug, source.as_str())?;
        let updated = write_with_unique_slug(
            &self.slug_service,
            SlugNamespace::Category,
            &base,
            Some(id.into()),
            |slug| {
                let repo = Arc::clone(&self.repo);
                let update = update.clone().with_slug(slug);
                async move { repo.update(update).await }
            },
        )
        .await?;

        tracing::info!(category_id = updated.id.0, slug = %updated.slug, "category updated");
        Ok(updated.into())
    }

    pub async fn delete_category(&self, command: DeleteCategoryCommand) -> ApplicationResult<()> {
        let id = CategoryId::new(command.id)?;
        self.repo.delete(id).await?;
        tracing::info!(category_id = id.0, "category deleted");
        Ok(())
    }
}
