//! Activity feed commands

mod list;

pub use list::ListActivity;
