//! AddDependency command

use crate::context::KanbanContext;
use crate::db;
use crate::error::{KanbanError, Result};
use crate::processor::logged;
use crate::types::{Activity, ActivityType, TaskId};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Record that a task is blocked by another task on the same board
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDependency {
    /// The task that has to wait
    pub task_id: TaskId,
    /// The task it waits on
    pub blocking_task_id: TaskId,
}

operation!(
    AddDependency,
    verb = "add",
    noun = "dependency",
    description = "Mark a task as blocked by another task"
);

impl AddDependency {
    pub fn new(task: impl Into<TaskId>, blocked_by: impl Into<TaskId>) -> Self {
        Self {
            task_id: task.into(),
            blocking_task_id: blocked_by.into(),
        }
    }
}

/// Walk "blocked by" edges from `current` looking for `target`.
///
/// On success `path` holds the chain from the start to `target`.
fn reaches(
    conn: &Connection,
    current: &TaskId,
    target: &TaskId,
    path: &mut Vec<TaskId>,
    seen: &mut HashSet<TaskId>,
) -> Result<bool> {
    path.push(current.clone());
    if current == target {
        return Ok(true);
    }
    if seen.insert(current.clone()) {
        for next in db::relation::blocking_ids(conn, current)? {
            if reaches(conn, &next, target, path, seen)? {
                return Ok(true);
            }
        }
    }
    path.pop();
    Ok(false)
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddDependency {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            if self.task_id == self.blocking_task_id {
                return Err(KanbanError::invalid_value(
                    "blockingTaskId",
                    "a task cannot depend on itself",
                ));
            }

            let actor = ctx.actor().clone();
            let detail = ctx
                .transaction(|tx| {
                    let task = db::task::get_task(tx, &self.task_id)?;
                    let blocking = db::task::get_task(tx, &self.blocking_task_id)?;
                    if task.board_id != blocking.board_id {
                        return Err(KanbanError::invalid_value(
                            "blockingTaskId",
                            "dependencies must stay within one board",
                        ));
                    }

                    // the new edge closes a loop if `blocking` already waits on `task`
                    let mut path = vec![task.id.clone()];
                    if reaches(tx, &blocking.id, &task.id, &mut path, &mut HashSet::new())? {
                        let path = path.iter().map(TaskId::as_str).collect::<Vec<_>>().join(" -> ");
                        return Err(KanbanError::DependencyCycle { path });
                    }

                    if db::relation::insert_dependency(tx, &task.id, &blocking.id, &Utc::now())? {
                        db::activity::insert_activity(
                            tx,
                            &Activity::new(
                                ActivityType::DependencyAdded,
                                format!("\"{}\" is now blocked by \"{}\"", task.title, blocking.title),
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
