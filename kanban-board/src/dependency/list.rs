//! ListDependencies command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use crate::types::TaskId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// What a task waits on and what waits on it
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDependencies {
    pub task_id: TaskId,
}

operation!(
    ListDependencies,
    verb = "list",
    noun = "dependencies",
    description = "List a task's blockers and dependents"
);

impl ListDependencies {
    pub fn new(task: impl Into<TaskId>) -> Self {
        Self {
            task_id: task.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListDependencies {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            ctx.read(|conn| {
                db::task::get_task(conn, &self.task_id)?;
                let blocked_by = db::relation::blocking_tasks(conn, &self.task_id)?;
                let blocks = db::relation::dependent_tasks(conn, &self.task_id)?;
                Ok(json!({
                    "taskId": self.task_id,
                    "blockedBy": blocked_by,
                    "blocks": blocks,
                }))
            })
            .await
        })
        .await
    }
}
