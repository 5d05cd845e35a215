//! DeleteColumn command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::notify::BoardEvent;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, ColumnId, ShiftDirection};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Delete a column.
///
/// Its tasks are appended, in their current order, after the tasks of the board's
/// leftmost remaining column. The last column of a board cannot be deleted.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteColumn {
    pub id: ColumnId,
}

operation!(
    DeleteColumn,
    verb = "delete",
    noun = "column",
    description = "Delete a column, moving its tasks to the first remaining column"
);

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let actor = ctx.actor().clone();
            let (column, target, moved) = ctx
                .transaction(|tx| {
                    let column = db::column::get_column(tx, &self.id)?;
                    let target = db::column::list_columns(tx, &column.board_id)?
                        .into_iter()
                        .find(|c| c.id != column.id)
                        .ok_or_else(|| KanbanError::LastColumn {
                            board: column.board_id.to_string(),
                        })?;

                    let orphans = db::task::tasks_in_column(tx, &column.id)?;
                    let offset = db::task::count_tasks(tx, &target.id)?;
                    let now = Utc::now();
                    for (index, task) in orphans.iter().enumerate() {
                        db::task::set_location(tx, &task.id, &target.id, offset + index, &now)?;
                    }
                    if !orphans.is_empty() {
                        db::column::bump_revision(tx, &target.id)?;
                    }

                    db::column::delete_column(tx, &column.id)?;
                    db::column::shift_columns(
                        tx,
                        &column.board_id,
                        column.position + 1,
                        None,
                        ShiftDirection::Down,
                    )?;

                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::ColumnDeleted,
                            format!("Deleted column \"{}\"", column.name),
                            column.board_id.clone(),
                            actor,
                        )
                        .with_metadata(json!({
                            "targetColumnId": target.id,
                            "movedTasks": orphans.len(),
                        })),
                    )?;
                    Ok((column, target, orphans.len()))
                })
                .await?;

            info!(column = %column.id, target = %target.id, moved, "deleted column");
            ctx.publish(BoardEvent::ColumnDeleted {
                column_id: column.id.clone(),
                board_id: column.board_id.clone(),
            });
            Ok(json!({
                "deleted": true,
                "id": column.id,
                "targetColumnId": target.id,
                "movedTasks": moved,
            }))
        })
        .await
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        let mut ids = vec![self.id.to_string()];
        if let Some(target) = result.get("targetColumnId").and_then(Value::as_str) {
            ids.push(target.to_string());
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_delete_column_appends_tasks_to_first_remaining() {
        let fx = Fixture::new().await;
        fx.add_task(0, "todo-a").await;
        fx.add_task(0, "todo-b").await;
        fx.add_task(1, "doing-a").await;
        fx.add_task(1, "doing-b").await;

        let result = DeleteColumn::new(fx.column(1))
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["movedTasks"], 2);

        assert_eq!(
            fx.titles(0).await,
            vec![
                ("todo-a".to_string(), 0),
                ("todo-b".to_string(), 1),
                ("doing-a".to_string(), 2),
                ("doing-b".to_string(), 3),
            ]
        );

        let board = fx.board.clone();
        let columns = fx
            .ctx
            .read(|conn| db::column::list_columns(conn, &board))
            .await
            .unwrap();
        let order: Vec<_> = columns.iter().map(|c| (c.name.as_str(), c.position)).collect();
        assert_eq!(order, vec![("To Do", 0), ("Done", 1)]);
    }

    #[tokio::test]
    async fn test_delete_first_column_uses_next() {
        let fx = Fixture::new().await;
        fx.add_task(0, "orphan").await;
        fx.add_task(1, "resident").await;

        DeleteColumn::new(fx.column(0))
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(
            fx.titles(1).await,
            vec![("resident".to_string(), 0), ("orphan".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn test_delete_last_column_rejected() {
        let fx = Fixture::new().await;
        DeleteColumn::new(fx.column(0)).execute(&fx.ctx).await.into_result().unwrap();
        DeleteColumn::new(fx.column(1)).execute(&fx.ctx).await.into_result().unwrap();
        fx.add_task(2, "survivor").await;

        let result = DeleteColumn::new(fx.column(2)).execute(&fx.ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::LastColumn { .. })));

        assert_eq!(fx.titles(2).await, vec![("survivor".to_string(), 0)]);
    }
}
