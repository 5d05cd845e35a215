//! Activity feed records, written inside the same transaction as the mutation they describe

use super::ids::{ActivityId, BoardId, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

string_enum! {
    /// What kind of change an activity records
    ActivityType {
        BoardCreated => "BOARD_CREATED",
        BoardUpdated => "BOARD_UPDATED",
        ColumnCreated => "COLUMN_CREATED",
        ColumnUpdated => "COLUMN_UPDATED",
        ColumnMoved => "COLUMN_MOVED",
        ColumnDeleted => "COLUMN_DELETED",
        TaskCreated => "TASK_CREATED",
        TaskUpdated => "TASK_UPDATED",
        TaskMoved => "TASK_MOVED",
        TaskDeleted => "TASK_DELETED",
        CommentAdded => "COMMENT_ADDED",
        CommentUpdated => "COMMENT_UPDATED",
        CommentDeleted => "COMMENT_DELETED",
        AttachmentAdded => "ATTACHMENT_ADDED",
        AttachmentDeleted => "ATTACHMENT_DELETED",
        ChecklistUpdated => "CHECKLIST_UPDATED",
        DependencyAdded => "DEPENDENCY_ADDED",
        DependencyRemoved => "DEPENDENCY_REMOVED",
        LabelAdded => "LABEL_ADDED",
        LabelRemoved => "LABEL_REMOVED",
        MemberAdded => "MEMBER_ADDED",
        MemberUpdated => "MEMBER_UPDATED",
        MemberRemoved => "MEMBER_REMOVED",
        TaskAssigned => "TASK_ASSIGNED",
        TaskUnassigned => "TASK_UNASSIGNED",
    }
}

/// One entry of a board's activity feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Human-readable summary, e.g. `Moved task "Ship it" to Done`
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    pub board_id: BoardId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        activity_type: ActivityType,
        content: impl Into<String>,
        board: impl Into<BoardId>,
        user: impl Into<UserId>,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            activity_type,
            content: content.into(),
            metadata: None,
            board_id: board.into(),
            task_id: None,
            user_id: user.into(),
            created_at: Utc::now(),
        }
    }

    /// Attach the task this activity concerns
    pub fn with_task(mut self, task: impl Into<TaskId>) -> Self {
        self.task_id = Some(task.into());
        self
    }

    /// Attach structured details
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
