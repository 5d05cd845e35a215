//! GetTask command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use crate::types::TaskId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get a task with its column, assignees, labels, comments, attachments, checklist and dependencies
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTask {
    pub id: TaskId,
}

operation!(GetTask, verb = "get", noun = "task", description = "Retrieve a task by ID");

impl GetTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            let detail = ctx.read(|conn| db::task::task_detail(conn, &self.id)).await?;
            let mut result = serde_json::to_value(&detail)?;
            result["progress"] = detail.progress().into();
            Ok(result)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_get_task() {
        let fx = Fixture::new().await;
        let id = fx.add_task(1, "Look me up").await;

        let result = GetTask::new(id.clone())
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["id"], id.as_str());
        assert_eq!(result["title"], "Look me up");
        assert_eq!(result["column"]["name"], "In Progress");
        assert!(result["comments"].as_array().unwrap().is_empty());
        assert_eq!(result["progress"], 0.0);
    }

    #[tokio::test]
    async fn test_get_task_not_found() {
        let ctx = KanbanContext::in_memory().unwrap();
        let result = GetTask::new("missing").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::TaskNotFound { .. })));
    }
}
