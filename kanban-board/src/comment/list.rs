//! ListComments command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use crate::types::TaskId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List a task's comments, oldest first
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListComments {
    pub task_id: TaskId,
}

operation!(ListComments, verb = "list", noun = "comments", description = "List comments on a task");

impl ListComments {
    pub fn new(task: impl Into<TaskId>) -> Self {
        Self {
            task_id: task.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListComments {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            let comments = ctx
                .read(|conn| {
                    db::task::get_task(conn, &self.task_id)?;
                    db::relation::list_comments(conn, &self.task_id)
                })
                .await?;
            Ok(json!({ "comments": comments, "count": comments.len() }))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::AddComment;
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_list_comments_oldest_first() {
        let fx = Fixture::new().await;
        let task = fx.add_task(0, "Thread").await;
        for text in ["first", "second", "third"] {
            AddComment::new(task.clone(), text)
                .execute(&fx.ctx)
                .await
                .into_result()
                .unwrap();
        }

        let result = ListComments::new(task).execute(&fx.ctx).await.into_result().unwrap();
        assert_eq!(result["count"], 3);
        assert_eq!(result["comments"][0]["content"], "first");
        assert_eq!(result["comments"][2]["content"], "third");
    }
}
