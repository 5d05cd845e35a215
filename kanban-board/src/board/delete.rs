//! DeleteBoard command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::BoardId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Delete a board with all of its columns, tasks, labels and members
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBoard {
    pub id: BoardId,
}

operation!(
    DeleteBoard,
    verb = "delete",
    noun = "board",
    description = "Delete a board and everything on it"
);

impl DeleteBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            ctx.transaction(|tx| {
                db::board::get_board(tx, &self.id)?;
                db::board::delete_board(tx, &self.id)
            })
            .await?;

            info!(board = %self.id, "deleted board");
            Ok(json!({ "deleted": true, "id": self.id }))
        })
        .await
    }
}
