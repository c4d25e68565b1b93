mod create;
mod delete;
mod import;
mod service;
mod update;

pub use create::CreatePostCommand;
pub use delete::DeletePostCommand;
pub use import::ImportPostItem;
pub use service::PostCommandService;
pub use update::UpdatePostCommand;
