//! UpdateColumn command

use super::relocate_column;
use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::notify::BoardEvent;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, ColumnId, ColumnPatch};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Update a column's display fields, and optionally its position
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateColumn {
    pub id: ColumnId,
    #[serde(flatten)]
    pub patch: ColumnPatch,
    /// New index among the board's columns; shifts the columns in between
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

operation!(
    UpdateColumn,
    verb = "update",
    noun = "column",
    description = "Update a column's name, color, WIP limit, visibility or position"
);

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>, patch: ColumnPatch) -> Self {
        Self {
            id: id.into(),
            patch,
            position: None,
        }
    }

    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            if self.patch.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
                return Err(KanbanError::invalid_value("name", "must not be empty"));
            }

            let actor = ctx.actor().clone();
            let (column, moved_from) = ctx
                .transaction(|tx| {
                    let mut column = db::column::get_column(tx, &self.id)?;
                    let original = column.position;

                    if let Some(position) = self.position {
                        column = relocate_column(tx, &column, position)?;
                    }
                    if !self.patch.is_empty() {
                        self.patch.apply(&mut column);
                        db::column::update_column(tx, &column)?;
                    }

                    if !self.patch.is_empty() || column.position != original {
                        db::activity::insert_activity(
                            tx,
                            &Activity::new(
                                ActivityType::ColumnUpdated,
                                format!("Updated column \"{}\"", column.name),
                                column.board_id.clone(),
                                actor,
                            )
                            .with_metadata(serde_json::to_value(&self.patch)?),
                        )?;
                    }
                    let moved_from = (column.position != original).then_some(original);
                    Ok((column, moved_from))
                })
                .await?;

            if !self.patch.is_empty() {
                ctx.publish(BoardEvent::ColumnUpdated {
                    column: column.clone(),
                });
            }
            if moved_from.is_some() {
                ctx.publish(BoardEvent::ColumnMoved {
                    column_id: column.id.clone(),
                    position: column.position,
                    board_id: column.board_id.clone(),
                });
            }
            Ok(serde_json::to_value(&column)?)
        })
        .await
    }
}
