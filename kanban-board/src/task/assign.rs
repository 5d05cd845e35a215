//! AssignTask command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, TaskId, UserId};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Assign a user to a task. Assigning someone twice is a no-op.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTask {
    pub id: TaskId,
    pub user_id: UserId,
}

operation!(
    AssignTask,
    verb = "assign",
    noun = "task",
    description = "Assign a user to a task"
);

impl AssignTask {
    pub fn new(id: impl Into<TaskId>, user: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            user_id: user.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AssignTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let actor = ctx.actor().clone();
            let detail = ctx
                .transaction(|tx| {
                    let task = db::task::get_task(tx, &self.id)?;
                    let user = db::user::get_user(tx, &self.user_id)?;
                    if db::relation::assign(tx, &task.id, &user.id, &Utc::now())? {
                        db::activity::insert_activity(
                            tx,
                            &Activity::new(
                                ActivityType::TaskAssigned,
                                format!("Assigned {} to \"{}\"", user.display_name(), task.title),
                                task.board_id.clone(),
                                actor,
                            )
                            .with_task(task.id.clone()),
                        )?;
                    }
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
    use crate::task::UnassignTask;
    use crate::test_support::Fixture;
    use crate::user::AddUser;

    #[tokio::test]
    async fn test_assign_and_unassign() {
        let fx = Fixture::new().await;
        let task = fx.add_task(0, "Pair on it").await;
        let user = AddUser::new("ana@example.com")
            .with_name("Ana")
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();
        let user_id = user["id"].as_str().unwrap();

        let result = AssignTask::new(task.clone(), user_id)
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["assignees"][0]["user"]["name"], "Ana");

        // second assignment changes nothing
        let result = AssignTask::new(task.clone(), user_id)
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["assignees"].as_array().unwrap().len(), 1);

        let result = UnassignTask::new(task.clone(), user_id)
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();
        assert!(result["assignees"].as_array().unwrap().is_empty());

        let board = fx.board.clone();
        let feed = fx
            .ctx
            .read(|conn| db::activity::list_activity(conn, &board, Some(&task), None))
            .await
            .unwrap();
        let kinds: Vec<_> = feed.iter().map(|a| a.activity_type).collect();
        assert_eq!(
            kinds,
            vec![
                ActivityType::TaskUnassigned,
                ActivityType::TaskAssigned,
                ActivityType::TaskCreated,
            ]
        );
    }

    #[tokio::test]
    async fn test_assign_unknown_user() {
        let fx = Fixture::new().await;
        let task = fx.add_task(0, "Solo").await;

        let result = AssignTask::new(task, "ghost").execute(&fx.ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::UserNotFound { .. })));
    }
}
