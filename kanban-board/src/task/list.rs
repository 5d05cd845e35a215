//! ListTasks command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use crate::types::{BoardId, ColumnId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

/// List a board's tasks ordered by column, then position
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasks {
    pub board_id: BoardId,
    /// Only tasks in this column
    pub column_id: Option<ColumnId>,
    #[serde(default)]
    pub include_archived: bool,
}

operation!(
    ListTasks,
    verb = "list",
    noun = "tasks",
    description = "List tasks with optional column filter"
);

impl ListTasks {
    pub fn new(board: impl Into<BoardId>) -> Self {
        Self {
            board_id: board.into(),
            column_id: None,
            include_archived: false,
        }
    }

    pub fn in_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column_id = Some(column.into());
        self
    }

    pub fn with_archived(mut self, include_archived: bool) -> Self {
        self.include_archived = include_archived;
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListTasks {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            let tasks = ctx
                .read(|conn| {
                    db::board::get_board(conn, &self.board_id)?;
                    if let Some(column) = &self.column_id {
                        db::column::get_column(conn, column)?;
                    }
                    db::task::list_tasks(
                        conn,
                        &self.board_id,
                        self.column_id.as_ref(),
                        self.include_archived,
                    )
                })
                .await?;

            debug!(board = %self.board_id, count = tasks.len(), "listed tasks");
            Ok(json!({ "tasks": tasks, "count": tasks.len() }))
        })
        .await
    }
}
