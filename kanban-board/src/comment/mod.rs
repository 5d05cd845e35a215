//! Comment commands

mod add;
mod delete;
mod list;
mod update;

pub use add::AddComment;
pub use delete::DeleteComment;
pub use list::ListComments;
pub use update::UpdateComment;
