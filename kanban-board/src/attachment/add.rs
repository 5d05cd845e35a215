//! AddAttachment command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, Attachment, AttachmentId, TaskId};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// MIME type recorded when the caller does not send one
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Attach a file reference to a task
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAttachment {
    pub task_id: TaskId,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub size: u64,
    pub mime_type: Option<String>,
}

operation!(
    AddAttachment,
    verb = "add",
    noun = "attachment",
    description = "Attach a file to a task"
);

impl AddAttachment {
    pub fn new(task: impl Into<TaskId>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            task_id: task.into(),
            name: name.into(),
            url: url.into(),
            size: 0,
            mime_type: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddAttachment {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            if self.name.trim().is_empty() {
                return Err(KanbanError::missing_field("name"));
            }
            if self.url.trim().is_empty() {
                return Err(KanbanError::missing_field("url"));
            }

            let actor = ctx.actor().clone();
            let attachment = ctx
                .transaction(|tx| {
                    let task = db::task::get_task(tx, &self.task_id)?;
                    let attachment = Attachment {
                        id: AttachmentId::new(),
                        task_id: task.id.clone(),
                        name: self.name.trim().to_string(),
                        url: self.url.trim().to_string(),
                        size: self.size,
                        mime_type: self
                            .mime_type
                            .clone()
                            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
                        created_at: Utc::now(),
                    };
                    db::relation::insert_attachment(tx, &attachment)?;
                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::AttachmentAdded,
                            format!("Attached {} to \"{}\"", attachment.name, task.title),
                            task.board_id.clone(),
                            actor,
                        )
                        .with_task(task.id.clone()),
                    )?;
                    Ok(attachment)
                })
                .await?;
            Ok(serde_json::to_value(&attachment)?)
        })
        .await
    }
}
