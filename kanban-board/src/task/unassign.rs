//! UnassignTask command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, TaskId, UserId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Remove a user from a task's assignees
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignTask {
    pub id: TaskId,
    pub user_id: UserId,
}

operation!(
    UnassignTask,
    verb = "unassign",
    noun = "task",
    description = "Remove a user from a task"
);

impl UnassignTask {
    pub fn new(id: impl Into<TaskId>, user: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            user_id: user.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UnassignTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let actor = ctx.actor().clone();
            let detail = ctx
                .transaction(|tx| {
                    let task = db::task::get_task(tx, &self.id)?;
                    if db::relation::unassign(tx, &task.id, &self.user_id)? {
                        let who = db::user::find_user(tx, &self.user_id)?
                            .map(|u| u.display_name().to_string())
                            .unwrap_or_else(|| self.user_id.to_string());
                        db::activity::insert_activity(
                            tx,
                            &Activity::new(
                                ActivityType::TaskUnassigned,
                                format!("Unassigned {} from \"{}\"", who, task.title),
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
