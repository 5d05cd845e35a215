//! The store's plain-value state

use crate::types::position::is_dense;
use crate::types::{Board, BoardId, Column, ColumnId, Label, Task, TaskId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Everything a board view renders from.
///
/// `columns` is kept sorted by position. `tasks` is keyed by id; a column's tasks are
/// found by filtering on `column_id` and sorting by `position`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub boards: Vec<Board>,
    pub current_board: Option<Board>,
    pub columns: Vec<Column>,
    pub tasks: HashMap<TaskId, Task>,
    pub labels: Vec<Label>,
    pub selected_tasks: HashSet<TaskId>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_board_id(&self) -> Option<&BoardId> {
        self.current_board.as_ref().map(|board| &board.id)
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| &column.id == id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Tasks of `column` in position order. Ties fall back to id order.
    pub fn tasks_in_column(&self, column: &ColumnId) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .values()
            .filter(|task| &task.column_id == column)
            .collect();
        tasks.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        tasks
    }

    /// Ids of `column`'s tasks in position order
    pub(crate) fn task_order(&self, column: &ColumnId) -> Vec<TaskId> {
        self.tasks_in_column(column)
            .into_iter()
            .map(|task| task.id.clone())
            .collect()
    }

    /// Whether every column and every column's tasks have dense positions
    pub fn is_consistent(&self) -> bool {
        is_dense(self.columns.iter().map(|column| column.position))
            && self.columns.iter().all(|column| {
                is_dense(self.tasks_in_column(&column.id).into_iter().map(|t| t.position))
            })
    }
}
