pub mod author;
pub mod category;
pub mod errors;
pub mod form;
pub mod listing;
pub mod post;
pub mod slug;
