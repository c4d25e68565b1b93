// tests/support/mocks/mod.rs
pub mod store;
pub mod time;

pub use store::InMemoryBlog;
pub use time::{StepClock, base_time};
