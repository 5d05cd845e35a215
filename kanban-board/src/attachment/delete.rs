//! DeleteAttachment command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, AttachmentId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Remove an attachment from its task
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAttachment {
    pub id: AttachmentId,
}

operation!(
    DeleteAttachment,
    verb = "delete",
    noun = "attachment",
    description = "Delete an attachment"
);

impl DeleteAttachment {
    pub fn new(id: impl Into<AttachmentId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteAttachment {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let actor = ctx.actor().clone();
            ctx.transaction(|tx| {
                let attachment = db::relation::get_attachment(tx, &self.id)?;
                let task = db::task::get_task(tx, &attachment.task_id)?;
                db::relation::delete_attachment(tx, &attachment.id)?;
                db::activity::insert_activity(
                    tx,
                    &Activity::new(
                        ActivityType::AttachmentDeleted,
                        format!("Removed {} from \"{}\"", attachment.name, task.title),
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
