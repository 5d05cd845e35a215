//! ListLabels command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use crate::types::BoardId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List a board's labels by name
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLabels {
    pub board_id: BoardId,
}

operation!(ListLabels, verb = "list", noun = "labels", description = "List board labels");

impl ListLabels {
    pub fn new(board: impl Into<BoardId>) -> Self {
        Self {
            board_id: board.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListLabels {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            let labels = ctx
                .read(|conn| {
                    db::board::get_board(conn, &self.board_id)?;
                    db::label::list_labels(conn, &self.board_id)
                })
                .await?;
            Ok(json!({ "labels": labels, "count": labels.len() }))
        })
        .await
    }
}
