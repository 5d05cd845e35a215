//! Kanban board engine with SQLite-backed storage and dense task ordering
//!
//! Boards own ordered columns; columns own ordered tasks. Every list keeps a dense,
//! zero-based `position`: after any completed mutation the positions of a column's
//! tasks are exactly `0..n`. The same ordering rules run in two places:
//!
//! - **Server commands** ([`task::MoveTask`], [`column::DeleteColumn`], ...) apply them
//!   inside one SQLite transaction per operation and record an activity entry.
//! - **The client store** ([`store::BoardStore`]) applies them to an in-memory copy for
//!   optimistic updates, then reconciles with server responses and [`BoardEvent`]s.
//!
//! Both sides plan moves with [`types::position`], so they agree on every valid move.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use kanban_board::{board::CreateBoard, task::{AddTask, MoveTask}, Execute, KanbanContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = KanbanContext::open("kanban.db")?;
//!
//! let board = CreateBoard::new("My Project").execute(&ctx).await.into_result()?;
//! let board_id = board["id"].as_str().unwrap_or_default();
//! let todo = board["columns"][0]["id"].as_str().unwrap_or_default();
//! let done = board["columns"][2]["id"].as_str().unwrap_or_default();
//!
//! let task = AddTask::new(board_id, todo, "Implement feature X")
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//!
//! MoveTask::new(task["id"].as_str().unwrap_or_default(), done, 0)
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage
//!
//! One SQLite file holds every board. Each mutating command runs in a single
//! `BEGIN IMMEDIATE` transaction that also writes its activity row, so a failed
//! command leaves no partial renumbering behind. The [`KanbanOperationProcessor`]
//! additionally writes one `operation_log` row per logged operation.

pub mod config;
mod context;
pub mod db;
mod error;
pub mod notify;
mod processor;
pub mod store;
pub mod types;

// Command modules
pub mod activity;
pub mod attachment;
pub mod board;
pub mod checklist;
pub mod column;
pub mod comment;
pub mod dependency;
pub mod label;
pub mod member;
pub mod task;
pub mod user;

// Re-export Execute trait and types from operations crate
pub use kanban_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};

pub use config::KanbanConfig;
pub use context::KanbanContext;
pub use error::{ErrorKind, KanbanError, Result};
pub use notify::BoardEvent;
pub use processor::KanbanOperationProcessor;
pub use store::{BoardAction, BoardState, BoardStore, StoreOutcome};

// Re-export commonly used types
pub use types::{
    Activity, ActivityType, Board, BoardId, BoardMember, BoardRole, Column, ColumnId, Label,
    LabelId, Priority, Task, TaskDetail, TaskId, TaskPatch, User, UserId,
};
