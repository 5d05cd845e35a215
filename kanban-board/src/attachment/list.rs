//! ListAttachments command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use crate::types::TaskId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List a task's attachments
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAttachments {
    pub task_id: TaskId,
}

operation!(
    ListAttachments,
    verb = "list",
    noun = "attachments",
    description = "List attachments on a task"
);

impl ListAttachments {
    pub fn new(task: impl Into<TaskId>) -> Self {
        Self {
            task_id: task.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListAttachments {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            let attachments = ctx
                .read(|conn| {
                    db::task::get_task(conn, &self.task_id)?;
                    db::relation::list_attachments(conn, &self.task_id)
                })
                .await?;
            let total: u64 = attachments.iter().map(|a| a.size).sum();
            Ok(json!({
                "attachments": attachments,
                "count": attachments.len(),
                "totalSize": total,
            }))
        })
        .await
    }
}
