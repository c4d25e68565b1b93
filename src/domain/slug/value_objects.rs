use super::transliterate::is_normalized;
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

/// Entity collection inside which a slug must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlugNamespace {
    Post,
    Author,
    Category,
}

impl SlugNamespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Author => "author",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for SlugNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if !is_normalized(&value) {
            return Err(DomainError::Validation(format!(
                "slug must contain only a-z, 0-9 and single hyphens: {value:?}"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}
