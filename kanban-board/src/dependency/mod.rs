//! Task dependency commands. The "blocked by" graph stays acyclic.

mod add;
mod list;
mod remove;

pub use add::AddDependency;
pub use list::ListDependencies;
pub use remove::RemoveDependency;
