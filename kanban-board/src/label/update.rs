//! UpdateLabel command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{LabelId, LabelPatch};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rename or recolor a label
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLabel {
    pub id: LabelId,
    #[serde(flatten)]
    pub patch: LabelPatch,
}

operation!(UpdateLabel, verb = "update", noun = "label", description = "Update a label");

impl UpdateLabel {
    pub fn new(id: impl Into<LabelId>, patch: LabelPatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateLabel {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            if self.patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                return Err(KanbanError::invalid_value("name", "must not be empty"));
            }

            let label = ctx
                .transaction(|tx| {
                    let mut label = db::label::get_label(tx, &self.id)?;
                    if let Some(name) = &self.patch.name {
                        let taken = db::label::list_labels(tx, &label.board_id)?
                            .iter()
                            .any(|l| l.id != label.id && l.name.eq_ignore_ascii_case(name.trim()));
                        if taken {
                            return Err(KanbanError::duplicate_id("label", name.trim()));
                        }
                    }
                    self.patch.apply(&mut label);
                    label.name = label.name.trim().to_string();
                    db::label::update_label(tx, &label)?;
                    Ok(label)
                })
                .await?;

            Ok(serde_json::to_value(&label)?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::AddLabel;
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_update_label() {
        let fx = Fixture::new().await;
        let label = AddLabel::new(fx.board.clone(), "bug", "#ff0000")
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();

        let patch = LabelPatch {
            name: Some("defect".into()),
            color: None,
        };
        let result = UpdateLabel::new(label["id"].as_str().unwrap(), patch)
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["name"], "defect");
        assert_eq!(result["color"], "#ff0000");
    }

    #[tokio::test]
    async fn test_update_missing_label() {
        let fx = Fixture::new().await;
        let result = UpdateLabel::new("nope", LabelPatch::default())
            .execute(&fx.ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::NotFound { .. })));
    }
}
