// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    /// Turn human text into a slug candidate (may be empty).
    fn slugify(&self, input: &str) -> String;
}
