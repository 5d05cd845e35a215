//! AddTask command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::notify::BoardEvent;
use crate::processor::logged;
use crate::types::position::check_destination;
use crate::types::{
    Activity, ActivityType, BoardId, ColumnId, LabelId, Priority, Shift, ShiftDirection, Task,
    UserId,
};
use chrono::{DateTime, Utc};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Add a new task to a column.
///
/// Without a position the task is appended. An explicit position in `[0, n]` pushes the
/// tasks at and after it down by one.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTask {
    pub board_id: BoardId,
    #[serde(default)]
    pub column_id: Option<ColumnId>,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub position: Option<usize>,
    #[serde(default)]
    pub assignees: Vec<UserId>,
    #[serde(default)]
    pub labels: Vec<LabelId>,
}

operation!(
    AddTask,
    verb = "add",
    noun = "task",
    description = "Create a new task in a column"
);

impl AddTask {
    pub fn new(
        board: impl Into<BoardId>,
        column: impl Into<ColumnId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            board_id: board.into(),
            column_id: Some(column.into()),
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
            position: None,
            assignees: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Insert at `position` instead of appending
    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_assignees(mut self, assignees: Vec<UserId>) -> Self {
        self.assignees = assignees;
        self
    }

    pub fn with_labels(mut self, labels: Vec<LabelId>) -> Self {
        self.labels = labels;
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            if self.title.trim().is_empty() {
                return Err(KanbanError::missing_field("title"));
            }
            let column_id = self
                .column_id
                .clone()
                .ok_or_else(|| KanbanError::missing_field("columnId"))?;

            let actor = ctx.actor().clone();
            let detail = ctx
                .transaction(|tx| {
                    db::board::get_board(tx, &self.board_id)?;
                    let column = db::column::get_column(tx, &column_id)?;
                    if column.board_id != self.board_id {
                        return Err(KanbanError::invalid_value(
                            "columnId",
                            format!("column {} belongs to another board", column.id),
                        ));
                    }

                    let count = db::task::count_tasks(tx, &column.id)?;
                    let position = match self.position {
                        Some(requested) => check_destination("task", false, count, requested)?,
                        None => count,
                    };
                    if position < count {
                        db::task::apply_shift(
                            tx,
                            &Shift {
                                column: column.id.clone(),
                                from: position,
                                through: None,
                                direction: ShiftDirection::Up,
                            },
                        )?;
                    }

                    let mut task = Task::new(self.board_id.clone(), column.id.clone(), self.title.trim(), position);
                    task.description = self.description.clone();
                    task.priority = self.priority.unwrap_or_default();
                    task.due_date = self.due_date;
                    db::task::insert_task(tx, &task)?;

                    for user in &self.assignees {
                        db::user::get_user(tx, user)?;
                        db::relation::assign(tx, &task.id, user, &task.created_at)?;
                    }
                    for label in &self.labels {
                        let label = crate::label::board_label(tx, label, &task.board_id)?;
                        db::label::tag_task(tx, &task.id, &label.id)?;
                    }

                    db::column::bump_revision(tx, &column.id)?;
                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::TaskCreated,
                            format!("Created task \"{}\" in {}", task.title, column.name),
                            task.board_id.clone(),
                            actor,
                        )
                        .with_task(task.id.clone()),
                    )?;

                    db::task::task_detail(tx, &task.id)
                })
                .await?;

            info!(task = %detail.task.id, column = %detail.task.column_id, position = detail.task.position, "added task");
            ctx.publish(BoardEvent::TaskCreated {
                task: detail.task.clone(),
            });
            Ok(serde_json::to_value(&detail)?)
        })
        .await
    }
}
