// src/infrastructure/repositories/mod.rs
mod error;
mod ordering;
mod postgres_author;
mod postgres_category;
mod postgres_post;
mod postgres_slug;

pub use error::map_sqlx;
pub use postgres_author::PostgresAuthorRepository;
pub use postgres_category::PostgresCategoryRepository;
pub use postgres_post::{PostgresPostReadRepository, PostgresPostWriteRepository};
pub use postgres_slug::PostgresSlugRepository;
