//! Column commands

mod add;
mod delete;
mod get;
mod list;
mod mv;
mod update;

pub use add::AddColumn;
pub use delete::DeleteColumn;
pub use get::GetColumn;
pub use list::ListColumns;
pub use mv::MoveColumn;
pub use update::UpdateColumn;

pub(crate) use mv::relocate_column;
