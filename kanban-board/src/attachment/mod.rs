//! Attachment commands. Files live elsewhere; a task keeps name, URL, size and type.

mod add;
mod delete;
mod list;

pub use add::AddAttachment;
pub use delete::DeleteAttachment;
pub use list::ListAttachments;
