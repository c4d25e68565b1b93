mod repository;
mod resolve;
pub mod service;
mod transliterate;
mod value_objects;

pub use repository::SlugRepository;
pub use resolve::resolve_unique;
pub use service::SlugService;
pub use transliterate::{SEPARATOR, is_normalized, sanitize, transliterate};
pub use value_objects::{Slug, SlugNamespace};
