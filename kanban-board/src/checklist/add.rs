//! AddChecklistItem command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, ChecklistItem, ChecklistItemId, TaskId};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Append an item to a task's checklist
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChecklistItem {
    pub task_id: TaskId,
    pub content: String,
}

operation!(
    AddChecklistItem,
    verb = "add",
    noun = "checklist",
    description = "Append a checklist item to a task"
);

impl AddChecklistItem {
    pub fn new(task: impl Into<TaskId>, content: impl Into<String>) -> Self {
        Self {
            task_id: task.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddChecklistItem {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            if self.content.trim().is_empty() {
                return Err(KanbanError::missing_field("content"));
            }

            let actor = ctx.actor().clone();
            let item = ctx
                .transaction(|tx| {
                    let task = db::task::get_task(tx, &self.task_id)?;
                    let item = ChecklistItem {
                        id: ChecklistItemId::new(),
                        task_id: task.id.clone(),
                        content: self.content.trim().to_string(),
                        is_completed: false,
                        position: db::relation::count_checklist(tx, &task.id)?,
                        created_at: Utc::now(),
                    };
                    db::relation::insert_checklist_item(tx, &item)?;
                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::ChecklistUpdated,
                            format!("Added checklist item to \"{}\"", task.title),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_add_appends_items() {
        let fx = Fixture::new().await;
        let task = fx.add_task(0, "Release").await;

        for (expected, content) in ["tag", "build", "publish"].iter().enumerate() {
            let result = AddChecklistItem::new(task.clone(), *content)
                .execute(&fx.ctx)
                .await
                .into_result()
                .unwrap();
            assert_eq!(result["position"], expected);
            assert_eq!(result["isCompleted"], false);
        }
    }
}
