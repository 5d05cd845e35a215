//! Board change notifications.
//!
//! Commands publish a [`BoardEvent`] on the context's broadcast channel after their
//! transaction commits. Subscribers (other clients' stores, a websocket bridge) replay
//! them through `BoardAction::ApplyEvent`. The transport itself lives outside this crate.

use crate::types::{BoardId, Column, ColumnId, Task, TaskId};
use serde::{Deserialize, Serialize};

/// A committed change to a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum BoardEvent {
    TaskCreated {
        task: Task,
    },
    TaskUpdated {
        task: Task,
    },
    TaskMoved {
        task_id: TaskId,
        source_column_id: ColumnId,
        destination_column_id: ColumnId,
        destination_position: usize,
        board_id: BoardId,
    },
    TaskDeleted {
        task_id: TaskId,
        column_id: ColumnId,
        board_id: BoardId,
    },
    ColumnCreated {
        column: Column,
    },
    ColumnUpdated {
        column: Column,
    },
    ColumnMoved {
        column_id: ColumnId,
        position: usize,
        board_id: BoardId,
    },
    ColumnDeleted {
        column_id: ColumnId,
        board_id: BoardId,
    },
}

impl BoardEvent {
    /// The board this event belongs to
    pub fn board_id(&self) -> &BoardId {
        match self {
            Self::TaskCreated { task } | Self::TaskUpdated { task } => &task.board_id,
            Self::ColumnCreated { column } | Self::ColumnUpdated { column } => &column.board_id,
            Self::TaskMoved { board_id, .. }
            | Self::TaskDeleted { board_id, .. }
            | Self::ColumnMoved { board_id, .. }
            | Self::ColumnDeleted { board_id, .. } => board_id,
        }
    }
}
