use crate::application::ports::util::SlugGenerator;
use crate::domain::slug::transliterate;

/// Slug generator backed by the blog's Russian transliteration table.
#[derive(Default, Clone)]
pub struct TransliteratingSlugGenerator;

impl SlugGenerator for TransliteratingSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        transliterate(input)
    }
}
