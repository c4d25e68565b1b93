pub mod authors;
pub mod categories;
pub mod posts;
mod unique_slug;
