//! UpdateTask command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::notify::BoardEvent;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, TaskId, TaskPatch};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Update a task's display fields. Use `MoveTask` to change column or position.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub id: TaskId,
    #[serde(flatten)]
    pub patch: TaskPatch,
}

operation!(
    UpdateTask,
    verb = "update",
    noun = "task",
    description = "Update a task's title, description, priority, dates or effort"
);

impl UpdateTask {
    pub fn new(id: impl Into<TaskId>, patch: TaskPatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            if self.patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
                return Err(KanbanError::invalid_value("title", "must not be empty"));
            }

            let actor = ctx.actor().clone();
            let (detail, changed) = ctx
                .transaction(|tx| {
                    let mut task = db::task::get_task(tx, &self.id)?;
                    if !self.patch.is_empty() {
                        self.patch.apply(&mut task);
                        task.updated_at = Utc::now();
                        db::task::update_task(tx, &task)?;
                        db::activity::insert_activity(
                            tx,
                            &Activity::new(
                                ActivityType::TaskUpdated,
                                format!("Updated task \"{}\"", task.title),
                                task.board_id.clone(),
                                actor,
                            )
                            .with_task(task.id.clone())
                            .with_metadata(serde_json::to_value(&self.patch)?),
                        )?;
                    }
                    Ok((db::task::task_detail(tx, &task.id)?, !self.patch.is_empty()))
                })
                .await?;

            if changed {
                ctx.publish(BoardEvent::TaskUpdated {
                    task: detail.task.clone(),
                });
            }
            Ok(serde_json::to_value(&detail)?)
        })
        .await
    }
}
