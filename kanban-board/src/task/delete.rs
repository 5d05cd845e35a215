//! DeleteTask command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::notify::BoardEvent;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, Shift, ShiftDirection, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Delete a task and close the gap it leaves in its column
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTask {
    pub id: TaskId,
}

operation!(DeleteTask, verb = "delete", noun = "task", description = "Delete a task");

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let actor = ctx.actor().clone();
            let task = ctx
                .transaction(|tx| {
                    let task = db::task::get_task(tx, &self.id)?;
                    db::task::delete_task(tx, &task.id)?;
                    db::task::apply_shift(
                        tx,
                        &Shift {
                            column: task.column_id.clone(),
                            from: task.position + 1,
                            through: None,
                            direction: ShiftDirection::Down,
                        },
                    )?;
                    db::column::bump_revision(tx, &task.column_id)?;
                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::TaskDeleted,
                            format!("Deleted task \"{}\"", task.title),
                            task.board_id.clone(),
                            actor,
                        )
                        .with_task(task.id.clone()),
                    )?;
                    Ok(task)
                })
                .await?;

            info!(task = %task.id, column = %task.column_id, "deleted task");
            ctx.publish(BoardEvent::TaskDeleted {
                task_id: task.id.clone(),
                column_id: task.column_id.clone(),
                board_id: task.board_id.clone(),
            });
            Ok(json!({ "deleted": true, "id": task.id }))
        })
        .await
    }
}
