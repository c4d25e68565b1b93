use std::sync::Arc;

use crate::{
    application::{
        dto::{DerivedFormDto, SlugPreviewDto},
        ports::util::SlugGenerator,
    },
    domain::form::{DependentField, FormFields},
};

/// Something that happened in an admin entity form.
#[derive(Debug, Clone)]
pub enum FormEvent {
    SourceChanged(String),
    FieldEdited { field: DependentField, value: String },
    Reset,
}

/// Stateless helpers backing the admin forms' live previews.
pub struct FormQueryService {
    slugger: Arc<dyn SlugGenerator>,
}

impl FormQueryService {
    pub fn new(slugger: Arc<dyn SlugGenerator>) -> Self {
        Self { slugger }
    }

    /// The slug the form would show for `text`, before uniqueness is applied.
    pub fn preview_slug(&self, text: &str) -> SlugPreviewDto {
        SlugPreviewDto {
            slug: self.slugger.slugify(text),
        }
    }

    pub fn derive_form(&self, mut fields: FormFields, event: FormEvent) -> DerivedFormDto {
        match event {
            FormEvent::SourceChanged(source) => fields.on_source_change(&source),
            FormEvent::FieldEdited { field, value } => fields.on_field_edit(field, value),
            FormEvent::Reset => fields.reset(),
        }
        DerivedFormDto { fields }
    }
}
