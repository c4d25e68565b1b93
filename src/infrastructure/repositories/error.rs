use crate::domain::errors::DomainError;
use crate::domain::slug::SlugNamespace;

const CNT_POST_SLUG: &str = "posts_slug_key";
const CNT_CATEGORY_SLUG: &str = "categories_slug_key";
const CNT_AUTHOR_SLUG: &str = "authors_slug_key";
const CNT_CATEGORY_NAME: &str = "categories_name_lower_key";
const CNT_AUTHOR_NAME: &str = "authors_name_lower_key";
const CNT_POST_CATEGORY: &str = "posts_category_id_fkey";
const CNT_POST_AUTHOR: &str = "posts_author_id_fkey";

const FOREIGN_KEY_VIOLATION: &str = "23503";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_POST_SLUG => DomainError::SlugTaken(SlugNamespace::Post),
                    CNT_CATEGORY_SLUG => DomainError::SlugTaken(SlugNamespace::Category),
                    CNT_AUTHOR_SLUG => DomainError::SlugTaken(SlugNamespace::Author),
                    CNT_CATEGORY_NAME => {
                        DomainError::Conflict("category name already exists".into())
                    }
                    CNT_AUTHOR_NAME => DomainError::Conflict("author name already exists".into()),
                    CNT_POST_CATEGORY => DomainError::NotFound("category not found".into()),
                    CNT_POST_AUTHOR => DomainError::NotFound("author not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    FOREIGN_KEY_VIOLATION => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// True when a delete was blocked by rows still referencing the target.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    )
}
