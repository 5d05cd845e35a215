//! CLI definition for the kanban command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kanban board engine
#[derive(Parser, Debug)]
#[command(name = "kanban")]
#[command(version)]
#[command(about = "Kanban boards with dense task ordering, backed by SQLite")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON). Defaults to ./kanban.toml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overrides the configuration
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Act as this user id, overrides the configuration
    #[arg(long, global = true)]
    pub actor: Option<String>,

    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Noun,
}

#[derive(Subcommand, Debug)]
pub enum Noun {
    /// Manage users
    #[command(subcommand)]
    User(UserCommand),
    /// Manage boards
    #[command(subcommand)]
    Board(BoardCommand),
    /// Manage a board's columns
    #[command(subcommand)]
    Column(ColumnCommand),
    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),
    /// Read a board's activity feed
    #[command(subcommand)]
    Activity(ActivityCommand),
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Register a user
    Add {
        email: String,
        #[arg(long)]
        name: Option<String>,
        /// Use this id instead of a generated one
        #[arg(long)]
        id: Option<String>,
    },
    /// Show a user
    Get { id: String },
    /// List every user
    List,
}

#[derive(Subcommand, Debug)]
pub enum BoardCommand {
    /// Create a board with the default columns
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Show a board with its columns, members and labels
    Get { id: String },
    /// List the boards you created or belong to
    List {
        /// Include archived boards
        #[arg(long)]
        archived: bool,
    },
    /// Rename, describe or archive a board
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        archived: Option<bool>,
    },
    /// Delete a board and everything on it
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ColumnCommand {
    /// Append a column to a board
    Add {
        board: String,
        name: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        wip_limit: Option<u32>,
    },
    /// List a board's columns
    List { board: String },
    /// Show a column with its tasks
    Get { id: String },
    /// Change a column's display fields
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        wip_limit: Option<u32>,
        #[arg(long)]
        hidden: Option<bool>,
    },
    /// Move a column to a zero-based position
    Move { id: String, position: usize },
    /// Delete a column; its tasks move to the first remaining column
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task
    Add {
        board: String,
        title: String,
        #[arg(long)]
        column: String,
        #[arg(long)]
        description: Option<String>,
        /// LOW, MEDIUM, HIGH or URGENT
        #[arg(long)]
        priority: Option<String>,
        /// Insert at this position instead of appending
        #[arg(long)]
        position: Option<usize>,
    },
    /// Show a task with its relations
    Get { id: String },
    /// List a board's tasks by column and position
    List {
        board: String,
        #[arg(long)]
        column: Option<String>,
        /// Include archived tasks
        #[arg(long)]
        archived: bool,
    },
    /// Change a task's display fields
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        archived: Option<bool>,
    },
    /// Move a task to a column and zero-based position
    Move {
        id: String,
        column: String,
        position: usize,
        /// Fail if the destination column changed since this revision
        #[arg(long)]
        expected_revision: Option<u64>,
    },
    /// Delete a task
    Delete { id: String },
    /// Assign a user to a task
    Assign { id: String, user: String },
    /// Remove a user from a task
    Unassign { id: String, user: String },
}

#[derive(Subcommand, Debug)]
pub enum ActivityCommand {
    /// Show a board's feed, newest first
    List {
        board: String,
        /// Only entries about this task
        #[arg(long)]
        task: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
}
