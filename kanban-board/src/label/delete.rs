//! DeleteLabel command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::LabelId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Delete a label. It is removed from every task that carried it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLabel {
    pub id: LabelId,
}

operation!(DeleteLabel, verb = "delete", noun = "label", description = "Delete a label");

impl DeleteLabel {
    pub fn new(id: impl Into<LabelId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteLabel {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            ctx.transaction(|tx| {
                db::label::get_label(tx, &self.id)?;
                db::label::delete_label(tx, &self.id)
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
    use crate::label::{AddLabel, TagTask};
    use crate::task::GetTask;
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_delete_label_untags_tasks() {
        let fx = Fixture::new().await;
        let task = fx.add_task(0, "Tagged").await;
        let label = AddLabel::named(fx.board.clone(), "bug")
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();
        let label_id = label["id"].as_str().unwrap();
        TagTask::new(task.clone(), label_id)
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();

        DeleteLabel::new(label_id).execute(&fx.ctx).await.into_result().unwrap();

        let detail = GetTask::new(task).execute(&fx.ctx).await.into_result().unwrap();
        assert!(detail["labels"].as_array().unwrap().is_empty());
    }
}
