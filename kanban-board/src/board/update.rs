//! UpdateBoard command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, BoardId, BoardPatch};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Update a board's name, description, background or archived flag
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoard {
    pub id: BoardId,
    #[serde(flatten)]
    pub patch: BoardPatch,
}

operation!(
    UpdateBoard,
    verb = "update",
    noun = "board",
    description = "Update board properties"
);

impl UpdateBoard {
    pub fn new(id: impl Into<BoardId>, patch: BoardPatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            if self.patch.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
                return Err(KanbanError::invalid_value("name", "must not be empty"));
            }

            let actor = ctx.actor().clone();
            let board = ctx
                .transaction(|tx| {
                    let mut board = db::board::get_board(tx, &self.id)?;
                    if self.patch.is_empty() {
                        return Ok(board);
                    }
                    self.patch.apply(&mut board);
                    board.updated_at = Utc::now();
                    db::board::update_board(tx, &board)?;
                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::BoardUpdated,
                            format!("Updated board \"{}\"", board.name),
                            board.id.clone(),
                            actor,
                        )
                        .with_metadata(serde_json::to_value(&self.patch)?),
                    )?;
                    Ok(board)
                })
                .await?;

            Ok(serde_json::to_value(&board)?)
        })
        .await
    }
}
