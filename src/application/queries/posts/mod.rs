mod by_id;
mod by_slug;
mod list;
mod scoped;
mod search;
mod service;

pub use by_id::GetPostByIdQuery;
pub use by_slug::GetPostBySlugQuery;
pub use list::{AdminPostsQuery, ListPostsQuery};
pub use scoped::{AuthorPostsQuery, CategoryPostsQuery};
pub use search::SearchPostsQuery;
pub use service::PostQueryService;
