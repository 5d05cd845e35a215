//! Kanban CLI - drive a kanban database from the shell.
//!
//! Commands follow `kanban <noun> <verb>`:
//! - `kanban board create <name>`: Create a board with the default columns
//! - `kanban column add <board> <name>`: Append a column
//! - `kanban task add <board> <title> --column <id>`: Add a task
//! - `kanban task move <id> <column> <position>`: Move a task
//! - `kanban activity list <board>`: Show the activity feed
//!
//! Every command prints its JSON result on stdout.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

pub mod cli;
mod run;

pub use cli::{Cli, Noun};
pub use run::run;
