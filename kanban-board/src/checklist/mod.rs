//! Checklist commands. Item positions stay dense within their task.

mod add;
mod delete;
mod update;

pub use add::AddChecklistItem;
pub use delete::DeleteChecklistItem;
pub use update::UpdateChecklistItem;
