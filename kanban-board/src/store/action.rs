//! Mutations the store understands

use crate::notify::BoardEvent;
use crate::types::{
    Board, BoardId, BoardPatch, Column, ColumnId, ColumnPatch, Label, LabelId, LabelPatch, Task,
    TaskId, TaskPatch,
};
use serde::{Deserialize, Serialize};

/// One state transition of a [`super::BoardStore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum BoardAction {
    // Boards
    SetBoards { boards: Vec<Board> },
    SetCurrentBoard { board: Option<Board> },
    AddBoard { board: Board },
    UpdateBoard { board_id: BoardId, patch: BoardPatch },
    DeleteBoard { board_id: BoardId },

    // Columns
    /// Replace every column. Trusted input, only sorted.
    SetColumns { columns: Vec<Column> },
    AddColumn { column: Column },
    UpdateColumn { column_id: ColumnId, patch: ColumnPatch },
    /// Remove a column; its tasks join the leftmost remaining column
    DeleteColumn { column_id: ColumnId },
    MoveColumn { column_id: ColumnId, position: usize },

    // Tasks
    /// Replace every task. Trusted input.
    SetTasks { tasks: Vec<Task> },
    /// Insert at the task's own `position`, clamped to the column
    AddTask { task: Task },
    UpdateTask { task_id: TaskId, patch: TaskPatch },
    DeleteTask { task_id: TaskId },
    MoveTask {
        task_id: TaskId,
        destination_column_id: ColumnId,
        destination_position: usize,
    },
    MoveMultipleTasks {
        task_ids: Vec<TaskId>,
        destination_column_id: ColumnId,
        start_position: usize,
    },

    // Labels
    SetLabels { labels: Vec<Label> },
    AddLabel { label: Label },
    UpdateLabel { label_id: LabelId, patch: LabelPatch },
    DeleteLabel { label_id: LabelId },

    // Selection
    ToggleTaskSelection { task_id: TaskId },
    SelectMultipleTasks { task_ids: Vec<TaskId> },
    ClearSelection,

    // Utility
    SetLoading { loading: bool },
    SetError { error: Option<String> },
    Reset,

    // Reconciliation
    /// Replay a change committed by someone else
    ApplyEvent { event: BoardEvent },
    /// Replace a task with the server's copy, moving it if its slot differs
    ReconcileTask { task: Task },
}

impl BoardAction {
    pub fn move_task(
        task: impl Into<TaskId>,
        column: impl Into<ColumnId>,
        position: usize,
    ) -> Self {
        Self::MoveTask {
            task_id: task.into(),
            destination_column_id: column.into(),
            destination_position: position,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetBoards { .. } => "set_boards",
            Self::SetCurrentBoard { .. } => "set_current_board",
            Self::AddBoard { .. } => "add_board",
            Self::UpdateBoard { .. } => "update_board",
            Self::DeleteBoard { .. } => "delete_board",
            Self::SetColumns { .. } => "set_columns",
            Self::AddColumn { .. } => "add_column",
            Self::UpdateColumn { .. } => "update_column",
            Self::DeleteColumn { .. } => "delete_column",
            Self::MoveColumn { .. } => "move_column",
            Self::SetTasks { .. } => "set_tasks",
            Self::AddTask { .. } => "add_task",
            Self::UpdateTask { .. } => "update_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::MoveTask { .. } => "move_task",
            Self::MoveMultipleTasks { .. } => "move_multiple_tasks",
            Self::SetLabels { .. } => "set_labels",
            Self::AddLabel { .. } => "add_label",
            Self::UpdateLabel { .. } => "update_label",
            Self::DeleteLabel { .. } => "delete_label",
            Self::ToggleTaskSelection { .. } => "toggle_task_selection",
            Self::SelectMultipleTasks { .. } => "select_multiple_tasks",
            Self::ClearSelection => "clear_selection",
            Self::SetLoading { .. } => "set_loading",
            Self::SetError { .. } => "set_error",
            Self::Reset => "reset",
            Self::ApplyEvent { .. } => "apply_event",
            Self::ReconcileTask { .. } => "reconcile_task",
        }
    }
}
