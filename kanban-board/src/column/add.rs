//! AddColumn command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::notify::BoardEvent;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, BoardId, Column};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Color given to columns created without one
pub const DEFAULT_COLUMN_COLOR: &str = "#3B82F6";

/// Append a new column to the right end of a board
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddColumn {
    pub board_id: BoardId,
    pub name: String,
    pub color: Option<String>,
    pub wip_limit: Option<u32>,
}

operation!(
    AddColumn,
    verb = "add",
    noun = "column",
    description = "Append a new column to a board"
);

impl AddColumn {
    pub fn new(board: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            board_id: board.into(),
            name: name.into(),
            color: None,
            wip_limit: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_wip_limit(mut self, limit: u32) -> Self {
        self.wip_limit = Some(limit);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            if self.name.trim().is_empty() {
                return Err(KanbanError::missing_field("name"));
            }

            let actor = ctx.actor().clone();
            let column = ctx
                .transaction(|tx| {
                    db::board::get_board(tx, &self.board_id)?;
                    let position = db::column::count_columns(tx, &self.board_id)?;

                    let mut column = Column::new(self.board_id.clone(), self.name.trim(), position)
                        .with_color(self.color.as_deref().unwrap_or(DEFAULT_COLUMN_COLOR));
                    column.wip_limit = self.wip_limit;
                    db::column::insert_column(tx, &column)?;

                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::ColumnCreated,
                            format!("Created column \"{}\"", column.name),
                            self.board_id.clone(),
                            actor,
                        ),
                    )?;
                    Ok(column)
                })
                .await?;

            info!(column = %column.id, position = column.position, "added column");
            ctx.publish(BoardEvent::ColumnCreated {
                column: column.clone(),
            });
            Ok(serde_json::to_value(&column)?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_add_column_appends() {
        let fx = Fixture::new().await;

        let result = AddColumn::new(fx.board.clone(), "Review")
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["name"], "Review");
        assert_eq!(result["position"], 3);
        assert_eq!(result["color"], DEFAULT_COLUMN_COLOR);
        assert_eq!(result["revision"], 0);
    }

    #[tokio::test]
    async fn test_add_column_with_options() {
        let fx = Fixture::new().await;
        let mut events = fx.ctx.subscribe();

        let result = AddColumn::new(fx.board.clone(), "Blocked")
            .with_color("#ff0000")
            .with_wip_limit(2)
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["color"], "#ff0000");
        assert_eq!(result["wipLimit"], 2);
        assert!(matches!(
            events.recv().await.unwrap(),
            BoardEvent::ColumnCreated { .. }
        ));
    }

    #[tokio::test]
    async fn test_add_column_to_missing_board() {
        let ctx = KanbanContext::in_memory().unwrap();
        let result = AddColumn::new("nope", "Todo").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::BoardNotFound { .. })));
    }

    #[tokio::test]
    async fn test_add_column_requires_name() {
        let fx = Fixture::new().await;
        let result = AddColumn::new(fx.board.clone(), "  ")
            .execute(&fx.ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::MissingField { .. })));
    }
}
