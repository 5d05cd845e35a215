//! DeleteComment command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, CommentId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Delete a comment
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteComment {
    pub id: CommentId,
}

operation!(DeleteComment, verb = "delete", noun = "comment", description = "Delete a comment");

impl DeleteComment {
    pub fn new(id: impl Into<CommentId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteComment {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let actor = ctx.actor().clone();
            ctx.transaction(|tx| {
                let comment = db::relation::get_comment(tx, &self.id)?;
                let task = db::task::get_task(tx, &comment.task_id)?;
                db::relation::delete_comment(tx, &comment.id)?;
                db::activity::insert_activity(
                    tx,
                    &Activity::new(
                        ActivityType::CommentDeleted,
                        format!("Deleted a comment on \"{}\"", task.title),
                        task.board_id.clone(),
                        actor,
                    )
                    .with_task(task.id.clone()),
                )
            })
            .await?;
            Ok(json!({ "deleted": true, "id": self.id }))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::{AddComment, ListComments};
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_delete_comment() {
        let fx = Fixture::new().await;
        let task = fx.add_task(0, "Thread").await;
        let comment = AddComment::new(task.clone(), "oops")
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();

        DeleteComment::new(comment["id"].as_str().unwrap())
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();

        let result = ListComments::new(task).execute(&fx.ctx).await.into_result().unwrap();
        assert_eq!(result["count"], 0);
    }
}
