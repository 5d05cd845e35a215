//! DeleteChecklistItem command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, ChecklistItemId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Delete a checklist item; later items move up one slot
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteChecklistItem {
    pub id: ChecklistItemId,
}

operation!(
    DeleteChecklistItem,
    verb = "delete",
    noun = "checklist",
    description = "Delete a checklist item"
);

impl DeleteChecklistItem {
    pub fn new(id: impl Into<ChecklistItemId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteChecklistItem {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let actor = ctx.actor().clone();
            ctx.transaction(|tx| {
                let item = db::relation::get_checklist_item(tx, &self.id)?;
                let task = db::task::get_task(tx, &item.task_id)?;
                db::relation::delete_checklist_item(tx, &item)?;
                db::activity::insert_activity(
                    tx,
                    &Activity::new(
                        ActivityType::ChecklistUpdated,
                        format!("Removed checklist item \"{}\" from \"{}\"", item.content, task.title),
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
