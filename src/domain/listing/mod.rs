pub mod collation;
mod filter;
mod pagination;
mod sort;

pub use filter::{FilterContext, PostFilter, PostScope, TextFilter, build_filter, like_pattern};
pub use pagination::{ListingKind, PageNumber, PageResult, PageWindow, paginate, total_pages};
pub use sort::{OrderField, OrderSpec, SortDirection, SortKey, sort_key_to_ordering};
