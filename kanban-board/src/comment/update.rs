//! UpdateComment command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, CommentId};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Replace a comment's text
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComment {
    pub id: CommentId,
    pub content: String,
}

operation!(UpdateComment, verb = "update", noun = "comment", description = "Edit a comment");

impl UpdateComment {
    pub fn new(id: impl Into<CommentId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateComment {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            if self.content.trim().is_empty() {
                return Err(KanbanError::missing_field("content"));
            }

            let actor = ctx.actor().clone();
            let comment = ctx
                .transaction(|tx| {
                    let mut comment = db::relation::get_comment(tx, &self.id)?;
                    let task = db::task::get_task(tx, &comment.task_id)?;
                    comment.content = self.content.trim().to_string();
                    comment.updated_at = Utc::now();
                    db::relation::update_comment(tx, &comment)?;
                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::CommentUpdated,
                            format!("Edited a comment on \"{}\"", task.title),
                            task.board_id.clone(),
                            actor,
                        )
                        .with_task(task.id.clone()),
                    )?;
                    Ok(comment)
                })
                .await?;
            Ok(serde_json::to_value(&comment)?)
        })
        .await
    }
}
