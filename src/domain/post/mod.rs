pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewPost, Post, PostUpdate, PostView, RelatedRef};
pub use repository::{PostReadRepository, PostWriteRepository};
pub use value_objects::{PostId, PostTitle, optional_text};
