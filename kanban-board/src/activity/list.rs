//! ListActivity command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use crate::types::{BoardId, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A board's activity feed, newest first
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActivity {
    pub board_id: BoardId,
    /// Only entries about this task
    pub task_id: Option<TaskId>,
    pub limit: Option<usize>,
}

operation!(
    ListActivity,
    verb = "list",
    noun = "activity",
    description = "List a board's activity feed"
);

impl ListActivity {
    pub fn new(board: impl Into<BoardId>) -> Self {
        Self {
            board_id: board.into(),
            task_id: None,
            limit: None,
        }
    }

    pub fn for_task(mut self, task: impl Into<TaskId>) -> Self {
        self.task_id = Some(task.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListActivity {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            let entries = ctx
                .read(|conn| {
                    db::board::get_board(conn, &self.board_id)?;
                    db::activity::list_activity(conn, &self.board_id, self.task_id.as_ref(), self.limit)
                })
                .await?;
            Ok(json!({ "activities": entries, "count": entries.len() }))
        })
        .await
    }
}
