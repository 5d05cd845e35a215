//! Task types: Task, TaskPatch, TaskDetail and the task-owned relations

use super::board::{Column, Label, User};
use super::double_option;
use super::ids::{AttachmentId, BoardId, ChecklistItemId, ColumnId, CommentId, TaskId, UserId};
use super::position::Positioned;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Task priority
    #[derive(Default)]
    Priority {
        Low => "LOW",
        #[default]
        Medium => "MEDIUM",
        High => "HIGH",
        Urgent => "URGENT",
    }
}

/// A task/card on the board.
///
/// `position` is dense and zero-based within `column_id`. `board_id` is denormalized and
/// always equals the board owning the column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub title: String,
    pub description: Option<String>,
    pub position: usize,
    #[serde(default)]
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    /// Estimated effort in minutes
    pub time_estimate: Option<u32>,
    /// Logged effort in minutes
    pub time_spent: Option<u32>,
    #[serde(default)]
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task at `position` in `column`
    pub fn new(
        board: impl Into<BoardId>,
        column: impl Into<ColumnId>,
        title: impl Into<String>,
        position: usize,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            board_id: board.into(),
            column_id: column.into(),
            title: title.into(),
            description: None,
            position,
            priority: Priority::default(),
            due_date: None,
            start_date: None,
            time_estimate: None,
            time_spent: None,
            is_archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the task is past its due date at `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }
}

impl Positioned for Task {
    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

/// Partial update for a task's display fields.
///
/// Column and position are deliberately absent: they only change through a move.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_estimate: Option<Option<u32>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_spent: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl TaskPatch {
    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set (or clear, with `None`) the description
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the archived flag
    pub fn with_archived(mut self, archived: bool) -> Self {
        self.is_archived = Some(archived);
        self
    }

    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.start_date.is_none()
            && self.time_estimate.is_none()
            && self.time_spent.is_none()
            && self.is_archived.is_none()
    }

    /// Merge the patch into `task`. Leaves `updated_at` alone.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(start_date) = self.start_date {
            task.start_date = start_date;
        }
        if let Some(time_estimate) = self.time_estimate {
            task.time_estimate = time_estimate;
        }
        if let Some(time_spent) = self.time_spent {
            task.time_spent = time_spent;
        }
        if let Some(is_archived) = self.is_archived {
            task.is_archived = is_archived;
        }
    }
}

/// A user assigned to a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignee {
    pub task_id: TaskId,
    pub user_id: UserId,
    pub assigned_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// A comment on a task - part of the discussion thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub task_id: TaskId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Comment {
    pub fn new(task: impl Into<TaskId>, author: impl Into<UserId>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CommentId::new(),
            task_id: task.into(),
            user_id: author.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
            user: None,
        }
    }
}

/// A file attached to a task (stored elsewhere, referenced by URL)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: AttachmentId,
    pub task_id: TaskId,
    pub name: String,
    pub url: String,
    /// Size in bytes
    pub size: u64,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
}

/// One line of a task's checklist. Positions are dense within the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub task_id: TaskId,
    pub content: String,
    #[serde(default)]
    pub is_completed: bool,
    pub position: usize,
    pub created_at: DateTime<Utc>,
}

impl Positioned for ChecklistItem {
    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

/// A task with its full relation graph, as returned by get/move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub column: Column,
    pub assignees: Vec<TaskAssignee>,
    pub labels: Vec<Label>,
    pub comments: Vec<Comment>,
    pub attachments: Vec<Attachment>,
    pub checklist_items: Vec<ChecklistItem>,
    /// Tasks that must finish before this one
    pub blocked_by: Vec<Task>,
    /// Tasks waiting on this one
    pub blocks: Vec<Task>,
}

impl TaskDetail {
    /// Completed / total checklist items, 0.0 when there is no checklist
    pub fn progress(&self) -> f64 {
        let total = self.checklist_items.len();
        if total == 0 {
            return 0.0;
        }
        let completed = self
            .checklist_items
            .iter()
            .filter(|item| item.is_completed)
            .count();
        completed as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("b1", "c1", "Write docs", 3);
        assert_eq!(task.position, 3);
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.is_archived);
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task::new("b1", "c1", "Write docs", 0);
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["columnId"], "c1");
        assert_eq!(value["boardId"], "b1");
        assert_eq!(value["priority"], "MEDIUM");
    }

    #[test]
    fn test_patch_ignores_position_fields() {
        let patch: TaskPatch =
            serde_json::from_str(r#"{"title": "New", "position": 9, "columnId": "x"}"#).unwrap();
        let mut task = Task::new("b1", "c1", "Old", 2);
        patch.apply(&mut task);
        assert_eq!(task.title, "New");
        assert_eq!(task.position, 2);
        assert_eq!(task.column_id, "c1");
    }

    #[test]
    fn test_patch_clears_optional_fields() {
        let patch: TaskPatch = serde_json::from_str(r#"{"timeEstimate": null}"#).unwrap();
        assert!(!patch.is_empty());
        let mut task = Task::new("b1", "c1", "T", 0);
        task.time_estimate = Some(30);
        patch.apply(&mut task);
        assert_eq!(task.time_estimate, None);
    }
}
