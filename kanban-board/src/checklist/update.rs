//! UpdateChecklistItem command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, ChecklistItemId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Edit a checklist item's text or toggle it done
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChecklistItem {
    pub id: ChecklistItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

operation!(
    UpdateChecklistItem,
    verb = "update",
    noun = "checklist",
    description = "Edit or complete a checklist item"
);

impl UpdateChecklistItem {
    pub fn new(id: impl Into<ChecklistItemId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn completed(mut self, done: bool) -> Self {
        self.is_completed = Some(done);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateChecklistItem {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            if self.content.as_deref().is_some_and(|c| c.trim().is_empty()) {
                return Err(KanbanError::invalid_value("content", "must not be empty"));
            }

            let actor = ctx.actor().clone();
            let item = ctx
                .transaction(|tx| {
                    let mut item = db::relation::get_checklist_item(tx, &self.id)?;
                    let task = db::task::get_task(tx, &item.task_id)?;
                    if let Some(content) = &self.content {
                        item.content = content.trim().to_string();
                    }
                    if let Some(done) = self.is_completed {
                        item.is_completed = done;
                    }
                    db::relation::update_checklist_item(tx, &item)?;

                    let verb = match self.is_completed {
                        Some(true) => "Completed",
                        Some(false) => "Reopened",
                        None => "Edited",
                    };
                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::ChecklistUpdated,
                            format!("{verb} checklist item \"{}\" on \"{}\"", item.content, task.title),
                            task.board_id.clone(),
                            actor,
                        )
                        .with_task(task.id.clone()),
                    )?;
                    Ok(item)
                })
                .await?;
            Ok(serde_json::to_value(&item)?)
        })
        .await
    }
}
