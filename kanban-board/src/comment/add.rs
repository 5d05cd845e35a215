//! AddComment command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, Comment, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comment on a task as the acting user
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddComment {
    pub task_id: TaskId,
    pub content: String,
}

operation!(AddComment, verb = "add", noun = "comment", description = "Add a comment to a task");

impl AddComment {
    pub fn new(task: impl Into<TaskId>, content: impl Into<String>) -> Self {
        Self {
            task_id: task.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddComment {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            if self.content.trim().is_empty() {
                return Err(KanbanError::missing_field("content"));
            }

            let actor = ctx.actor().clone();
            let comment = ctx
                .transaction(|tx| {
                    let task = db::task::get_task(tx, &self.task_id)?;
                    let comment = Comment::new(task.id.clone(), actor.clone(), self.content.trim());
                    db::relation::insert_comment(tx, &comment)?;
                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::CommentAdded,
                            format!("Commented on \"{}\"", task.title),
                            task.board_id.clone(),
                            actor,
                        )
                        .with_task(task.id.clone()),
                    )?;
                    db::relation::get_comment(tx, &comment.id)
                })
                .await?;
            Ok(serde_json::to_value(&comment)?)
        })
        .await
    }
}
