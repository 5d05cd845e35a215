//! MoveColumn command

use crate::context::KanbanContext;
use crate::db;
use crate::error::{KanbanError, Result};
use crate::notify::BoardEvent;
use crate::processor::logged;
use crate::types::position::{check_destination, displaced_range};
use crate::types::{Activity, ActivityType, Column, ColumnId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Move a column to a new index among its board's columns
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveColumn {
    pub id: ColumnId,
    pub position: usize,
}

operation!(
    MoveColumn,
    verb = "move",
    noun = "column",
    description = "Reorder a column within its board"
);

impl MoveColumn {
    pub fn new(id: impl Into<ColumnId>, position: usize) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// Place `column` at index `to` and shift the columns in between.
///
/// `to` must lie in `[0, n-1]`. Returns the column with its new position.
pub(crate) fn relocate_column(conn: &Connection, column: &Column, to: usize) -> Result<Column> {
    let count = db::column::count_columns(conn, &column.board_id)?;
    check_destination("column", true, count, to)?;

    if let Some((first, last, direction)) = displaced_range(column.position, to) {
        db::column::shift_columns(conn, &column.board_id, first, Some(last), direction)?;
        db::column::set_column_position(conn, &column.id, to)?;
    }

    let mut moved = column.clone();
    moved.position = to;
    Ok(moved)
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for MoveColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let actor = ctx.actor().clone();
            let (column, from) = ctx
                .transaction(|tx| {
                    let column = db::column::get_column(tx, &self.id)?;
                    let from = column.position;
                    let moved = relocate_column(tx, &column, self.position)?;
                    if from != moved.position {
                        db::activity::insert_activity(
                            tx,
                            &Activity::new(
                                ActivityType::ColumnMoved,
                                format!("Moved column \"{}\" to position {}", moved.name, moved.position),
                                moved.board_id.clone(),
                                actor,
                            )
                            .with_metadata(json!({ "from": from, "to": moved.position })),
                        )?;
                    }
                    Ok((moved, from))
                })
                .await?;

            if from != column.position {
                info!(column = %column.id, from, to = column.position, "moved column");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    async fn column_names(fx: &Fixture) -> Vec<(String, usize)> {
        let board = fx.board.clone();
        fx.ctx
            .read(|conn| db::column::list_columns(conn, &board))
            .await
            .unwrap()
            .into_iter()
            .map(|c| (c.name, c.position))
            .collect()
    }

    #[tokio::test]
    async fn test_move_column_right() {
        let fx = Fixture::new().await;

        MoveColumn::new(fx.column(0), 2)
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(
            column_names(&fx).await,
            vec![
                ("In Progress".to_string(), 0),
                ("Done".to_string(), 1),
                ("To Do".to_string(), 2),
            ]
        );
    }

    #[tokio::test]
    async fn test_move_column_left() {
        let fx = Fixture::new().await;
        let mut events = fx.ctx.subscribe();

        let result = MoveColumn::new(fx.column(2), 0)
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["position"], 0);

        assert_eq!(
            column_names(&fx).await,
            vec![
                ("Done".to_string(), 0),
                ("To Do".to_string(), 1),
                ("In Progress".to_string(), 2),
            ]
        );
        assert!(matches!(
            events.recv().await.unwrap(),
            BoardEvent::ColumnMoved { position: 0, .. }
        ));
    }

    #[tokio::test]
    async fn test_move_column_out_of_range() {
        let fx = Fixture::new().await;

        let result = MoveColumn::new(fx.column(0), 3)
            .execute(&fx.ctx)
            .await
            .into_result();

        assert!(matches!(
            result,
            Err(KanbanError::PositionOutOfRange { position: 3, max: 2, .. })
        ));
        assert_eq!(column_names(&fx).await[0].0, "To Do");
    }

    #[tokio::test]
    async fn test_move_column_in_place_is_quiet() {
        let fx = Fixture::new().await;
        let board = fx.board.clone();
        let before = fx
            .ctx
            .read(|conn| db::activity::list_activity(conn, &board, None, None))
            .await
            .unwrap()
            .len();

        MoveColumn::new(fx.column(1), 1)
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();

        let board = fx.board.clone();
        let after = fx
            .ctx
            .read(|conn| db::activity::list_activity(conn, &board, None, None))
            .await
            .unwrap()
            .len();
        assert_eq!(before, after);
    }
}
