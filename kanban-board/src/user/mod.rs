//! User commands

mod add;
mod get;
mod list;

pub use add::AddUser;
pub use get::GetUser;
pub use list::ListUsers;
