//! MoveTask command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::notify::BoardEvent;
use crate::processor::logged;
use crate::types::position::{check_destination, plan_move};
use crate::types::{Activity, ActivityType, ColumnId, TaskId};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

/// Move a task to `destination_position` in `destination_column_id`.
///
/// Runs in one transaction: sibling positions in the source and destination columns
/// are shifted so both stay dense, then the task itself is written. Valid positions
/// are `[0, n-1]` within the same column and `[0, n]` across columns, where `n` is the
/// destination column's current task count.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTask {
    pub id: TaskId,
    pub destination_column_id: Option<ColumnId>,
    pub destination_position: Option<usize>,
    /// Reject the move if the destination column's revision differs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_revision: Option<u64>,
}

operation!(
    MoveTask,
    verb = "move",
    noun = "task",
    description = "Move a task to a column and position"
);

impl MoveTask {
    pub fn new(id: impl Into<TaskId>, column: impl Into<ColumnId>, position: usize) -> Self {
        Self {
            id: id.into(),
            destination_column_id: Some(column.into()),
            destination_position: Some(position),
            expected_revision: None,
        }
    }

    pub fn with_expected_revision(mut self, revision: u64) -> Self {
        self.expected_revision = Some(revision);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for MoveTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let destination = self
                .destination_column_id
                .clone()
                .ok_or_else(|| KanbanError::missing_field("destinationColumnId"))?;
            let requested = self
                .destination_position
                .ok_or_else(|| KanbanError::missing_field("destinationPosition"))?;

            let actor = ctx.actor().clone();
            let (detail, plan) = ctx
                .transaction(|tx| {
                    let task = db::task::get_task(tx, &self.id)?;
                    let column = db::column::get_column(tx, &destination)?;
                    if column.board_id != task.board_id {
                        return Err(KanbanError::invalid_value(
                            "destinationColumnId",
                            format!("column {} belongs to another board", column.id),
                        ));
                    }
                    if let Some(expected) = self.expected_revision {
                        if expected != column.revision {
                            return Err(KanbanError::StaleRevision {
                                column: column.id.to_string(),
                                expected,
                                actual: column.revision,
                            });
                        }
                    }

                    let same_column = task.column_id == column.id;
                    let count = db::task::count_tasks(tx, &column.id)?;
                    let position = check_destination("task", same_column, count, requested)?;
                    let plan = plan_move(&task.column_id, task.position, &column.id, position);

                    if !plan.is_noop() {
                        for shift in &plan.shifts {
                            let moved = db::task::apply_shift(tx, shift)?;
                            debug!(column = %shift.column, from = shift.from, moved, "shifted siblings");
                        }
                        db::task::set_location(tx, &task.id, &column.id, position, &Utc::now())?;
                        db::column::bump_revision(tx, &plan.source)?;
                        if plan.is_cross_column() {
                            db::column::bump_revision(tx, &plan.destination)?;
                        }
                    }

                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::TaskMoved,
                            format!("Moved task \"{}\" to {}", task.title, column.name),
                            task.board_id.clone(),
                            actor,
                        )
                        .with_task(task.id.clone())
                        .with_metadata(json!({
                            "sourceColumnId": plan.source,
                            "sourcePosition": plan.source_position,
                            "destinationColumnId": plan.destination,
                            "destinationPosition": plan.destination_position,
                        })),
                    )?;

                    Ok((db::task::task_detail(tx, &task.id)?, plan))
                })
                .await?;

            if !plan.is_noop() {
                info!(
                    task = %detail.task.id,
                    from = %plan.source,
                    to = %plan.destination,
                    position = plan.destination_position,
                    "moved task"
                );
                ctx.publish(BoardEvent::TaskMoved {
                    task_id: detail.task.id.clone(),
                    source_column_id: plan.source.clone(),
                    destination_column_id: plan.destination.clone(),
                    destination_position: plan.destination_position,
                    board_id: detail.task.board_id.clone(),
                });
            }
            let mut value = serde_json::to_value(&detail)?;
            value["sourceColumnId"] = json!(plan.source);
            Ok(value)
        })
        .await
    }

    /// The task plus every column whose order changed
    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        let mut ids = vec![self.id.to_string()];
        for key in ["sourceColumnId", "columnId"] {
            if let Some(column) = result.get(key).and_then(Value::as_str) {
                if !ids.iter().any(|id| id == column) {
                    ids.push(column.to_string());
                }
            }
        }
        ids
    }
}
