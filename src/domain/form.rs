//! Auto-derivation of dependent admin form fields.
//!
//! Each dependent field (slug, meta title, meta description) follows its
//! source field until the editor types into it directly. From then on the
//! field is left alone until the form is reset.

use crate::domain::slug::transliterate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const META_TITLE_MAX_CHARS: usize = 60;
pub const META_DESCRIPTION_MAX_CHARS: usize = 155;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldMode {
    #[default]
    Auto,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DependentField {
    Slug,
    MetaTitle,
    MetaDescription,
}

impl DependentField {
    pub fn derive(self, source: &str) -> String {
        match self {
            Self::Slug => transliterate(source),
            Self::MetaTitle => truncate_chars(source.trim(), META_TITLE_MAX_CHARS),
            Self::MetaDescription => truncate_chars(source.trim(), META_DESCRIPTION_MAX_CHARS),
        }
    }
}

/// Value for a dependent field after its source changed, or `None` to keep
/// whatever the editor typed.
pub fn auto_derive(source: &str, mode: FieldMode, field: DependentField) -> Option<String> {
    match mode {
        FieldMode::Auto => Some(field.derive(source)),
        FieldMode::Manual => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DerivedField {
    #[serde(default)]
    pub mode: FieldMode,
    #[serde(default)]
    pub value: String,
}

impl DerivedField {
    fn follow(&mut self, source: &str, field: DependentField) {
        if let Some(value) = auto_derive(source, self.mode, field) {
            self.value = value;
        }
    }

    fn edit(&mut self, value: String) {
        self.mode = FieldMode::Manual;
        self.value = value;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Dependent fields of an entity form (post, category or author).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormFields {
    #[serde(default)]
    pub slug: DerivedField,
    #[serde(default)]
    pub meta_title: DerivedField,
    #[serde(default)]
    pub meta_description: DerivedField,
}

impl FormFields {
    pub fn on_source_change(&mut self, source: &str) {
        self.slug.follow(source, DependentField::Slug);
        self.meta_title.follow(source, DependentField::MetaTitle);
        self.meta_description
            .follow(source, DependentField::MetaDescription);
    }

    pub fn on_field_edit(&mut self, field: DependentField, value: impl Into<String>) {
        self.field_mut(field).edit(value.into());
    }

    pub fn reset(&mut self) {
        self.slug.reset();
        self.meta_title.reset();
        self.meta_description.reset();
    }

    pub fn field(&self, field: DependentField) -> &DerivedField {
        match field {
            DependentField::Slug => &self.slug,
            DependentField::MetaTitle => &self.meta_title,
            DependentField::MetaDescription => &self.meta_description,
        }
    }

    fn field_mut(&mut self, field: DependentField) -> &mut DerivedField {
        match field {
            DependentField::Slug => &mut self.slug,
            DependentField::MetaTitle => &mut self.meta_title,
            DependentField::MetaDescription => &mut self.meta_description,
        }
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
