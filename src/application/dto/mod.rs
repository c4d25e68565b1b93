pub mod authors;
pub mod categories;
pub mod forms;
pub mod posts;

pub use authors::AuthorDto;
pub use categories::CategoryDto;
pub use forms::{DerivedFormDto, SlugPreviewDto};
pub use posts::{AuthorPostsDto, CategoryPostsDto, ImportReportDto, PostDto, RelatedDto};
