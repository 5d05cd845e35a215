//! AddLabel command

use super::label_color;
use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{BoardId, Label};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Create a label on a board. Names are unique per board, ignoring case.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLabel {
    pub board_id: BoardId,
    pub name: String,
    /// Defaults to a color derived from the name
    pub color: Option<String>,
}

operation!(AddLabel, verb = "add", noun = "label", description = "Create a board label");

impl AddLabel {
    pub fn new(board: impl Into<BoardId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            board_id: board.into(),
            name: name.into(),
            color: Some(color.into()),
        }
    }

    /// A label that takes its color from its name
    pub fn named(board: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            board_id: board.into(),
            name: name.into(),
            color: None,
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddLabel {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let name = self.name.trim();
            if name.is_empty() {
                return Err(KanbanError::missing_field("name"));
            }

            let label = ctx
                .transaction(|tx| {
                    db::board::get_board(tx, &self.board_id)?;
                    let taken = db::label::list_labels(tx, &self.board_id)?
                        .iter()
                        .any(|l| l.name.eq_ignore_ascii_case(name));
                    if taken {
                        return Err(KanbanError::duplicate_id("label", name));
                    }

                    let color = self.color.as_deref().unwrap_or_else(|| label_color(name));
                    let label = Label::new(self.board_id.clone(), name, color);
                    db::label::insert_label(tx, &label)?;
                    Ok(label)
                })
                .await?;

            Ok(serde_json::to_value(&label)?)
        })
        .await
    }
}
