//! RemoveDependency command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Drop a "blocked by" link
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveDependency {
    pub task_id: TaskId,
    pub blocking_task_id: TaskId,
}

operation!(
    RemoveDependency,
    verb = "remove",
    noun = "dependency",
    description = "Remove a dependency between two tasks"
);

impl RemoveDependency {
    pub fn new(task: impl Into<TaskId>, blocked_by: impl Into<TaskId>) -> Self {
        Self {
            task_id: task.into(),
            blocking_task_id: blocked_by.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for RemoveDependency {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let actor = ctx.actor().clone();
            let detail = ctx
                .transaction(|tx| {
                    let task = db::task::get_task(tx, &self.task_id)?;
                    if !db::relation::delete_dependency(tx, &task.id, &self.blocking_task_id)? {
                        return Err(KanbanError::not_found(
                            "dependency",
                            format!("{} -> {}", task.id, self.blocking_task_id),
                        ));
                    }
                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::DependencyRemoved,
                            format!("\"{}\" is no longer blocked by {}", task.title, self.blocking_task_id),
                            task.board_id.clone(),
                            actor,
                        )
                        .with_task(task.id.clone()),
                    )?;
                    db::task::task_detail(tx, &task.id)
                })
                .await?;
            Ok(serde_json::to_value(&detail)?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::AddDependency;
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_remove_dependency() {
        let fx = Fixture::new().await;
        let a = fx.add_task(0, "A").await;
        let b = fx.add_task(0, "B").await;
        AddDependency::new(a.clone(), b.clone()).execute(&fx.ctx).await.into_result().unwrap();

        let result = RemoveDependency::new(a.clone(), b.clone())
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();
        assert!(result["blockedBy"].as_array().unwrap().is_empty());

        let again = RemoveDependency::new(a, b).execute(&fx.ctx).await.into_result();
        assert!(matches!(again, Err(KanbanError::NotFound { .. })));
    }
}
