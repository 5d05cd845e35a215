//! UntagTask command

use super::board_label;
use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, LabelId, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Remove a label from a task
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UntagTask {
    pub id: TaskId,
    pub label_id: LabelId,
}

operation!(UntagTask, verb = "untag", noun = "task", description = "Remove a label from a task");

impl UntagTask {
    pub fn new(id: impl Into<TaskId>, label: impl Into<LabelId>) -> Self {
        Self {
            id: id.into(),
            label_id: label.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UntagTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let actor = ctx.actor().clone();
            let detail = ctx
                .transaction(|tx| {
                    let task = db::task::get_task(tx, &self.id)?;
                    let label = board_label(tx, &self.label_id, &task.board_id)?;
                    if db::label::untag_task(tx, &task.id, &label.id)? {
                        db::activity::insert_activity(
                            tx,
                            &Activity::new(
                                ActivityType::LabelRemoved,
                                format!("Removed label \"{}\" from \"{}\"", label.name, task.title),
                                task.board_id.clone(),
                                actor,
                            )
                            .with_task(task.id.clone()),
                        )?;
                    }
                    db::task::task_detail(tx, &task.id)
                })
                .await?;
            Ok(serde_json::to_value(&detail)?)
        })
        .await
    }
}
