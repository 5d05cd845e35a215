//! Board-level types: Board, BoardMember, Column, Label, User

use super::double_option;
use super::ids::{BoardId, ColumnId, LabelId, MemberId, UserId};
use super::position::Positioned;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A kanban board. Its columns are ordered by their own `position` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub description: Option<String>,
    pub background: Option<String>,
    #[serde(default)]
    pub is_archived: bool,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Create a new board owned by `creator`
    pub fn new(name: impl Into<String>, creator: impl Into<UserId>) -> Self {
        let now = Utc::now();
        Self {
            id: BoardId::new(),
            name: name.into(),
            description: None,
            background: None,
            is_archived: false,
            creator_id: creator.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Names and colors of the columns every new board starts with
    pub fn default_columns() -> [(&'static str, &'static str); 3] {
        [
            ("To Do", "#60a5fa"),
            ("In Progress", "#fbbf24"),
            ("Done", "#34d399"),
        ]
    }
}

/// Partial update for a board
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub background: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl BoardPatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.background.is_none()
            && self.is_archived.is_none()
    }

    /// Merge the patch into `board`
    pub fn apply(&self, board: &mut Board) {
        if let Some(name) = &self.name {
            board.name = name.clone();
        }
        if let Some(description) = &self.description {
            board.description = description.clone();
        }
        if let Some(background) = &self.background {
            board.background = background.clone();
        }
        if let Some(is_archived) = self.is_archived {
            board.is_archived = is_archived;
        }
    }
}

string_enum! {
    /// A member's role on a board
    BoardRole {
        Owner => "OWNER",
        Admin => "ADMIN",
        Member => "MEMBER",
        Viewer => "VIEWER",
    }
}

/// A user's membership on a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub id: MemberId,
    pub board_id: BoardId,
    pub user_id: UserId,
    pub role: BoardRole,
    pub joined_at: DateTime<Utc>,
    /// The member's user record, when it exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// A column defines a workflow stage.
///
/// `position` is dense and zero-based within the board. `revision` increases whenever
/// the set or order of tasks in the column changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub board_id: BoardId,
    pub name: String,
    pub position: usize,
    pub color: Option<String>,
    /// Advisory cap on the number of tasks; never enforced by moves
    pub wip_limit: Option<u32>,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub revision: u64,
}

impl Column {
    /// Create a new column at `position`
    pub fn new(board: impl Into<BoardId>, name: impl Into<String>, position: usize) -> Self {
        Self {
            id: ColumnId::new(),
            board_id: board.into(),
            name: name.into(),
            position,
            color: None,
            wip_limit: None,
            is_hidden: false,
            revision: 0,
        }
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Whether `task_count` exceeds the advisory WIP limit
    pub fn is_over_limit(&self, task_count: usize) -> bool {
        self.wip_limit
            .is_some_and(|limit| task_count > limit as usize)
    }
}

impl Positioned for Column {
    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

/// Partial update for a column. Position changes go through `MoveColumn`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub wip_limit: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
}

impl ColumnPatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.color.is_none()
            && self.wip_limit.is_none()
            && self.is_hidden.is_none()
    }

    /// Merge the patch into `column`
    pub fn apply(&self, column: &mut Column) {
        if let Some(name) = &self.name {
            column.name = name.clone();
        }
        if let Some(color) = &self.color {
            column.color = color.clone();
        }
        if let Some(wip_limit) = self.wip_limit {
            column.wip_limit = wip_limit;
        }
        if let Some(is_hidden) = self.is_hidden {
            column.is_hidden = is_hidden;
        }
    }
}

/// A colored label that can be attached to tasks of the same board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: LabelId,
    pub board_id: BoardId,
    pub name: String,
    pub color: String,
}

impl Label {
    pub fn new(board: impl Into<BoardId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: LabelId::new(),
            board_id: board.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Partial update for a label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LabelPatch {
    /// Merge the patch into `label`
    pub fn apply(&self, label: &mut Label) {
        if let Some(name) = &self.name {
            label.name = name.clone();
        }
        if let Some(color) = &self.color {
            label.color = color.clone();
        }
    }
}

/// A person who can own boards, be assigned tasks and write comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name: None,
            email: email.into(),
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The name when set, otherwise the email
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("owner".parse::<BoardRole>().unwrap(), BoardRole::Owner);
        assert_eq!(BoardRole::Viewer.to_string(), "VIEWER");
        assert!("superuser".parse::<BoardRole>().is_err());
    }

    #[test]
    fn test_board_patch_distinguishes_null_from_absent() {
        let patch: BoardPatch = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(patch.description, Some(None));
        assert!(patch.background.is_none());

        let mut board = Board::new("B", "u1").with_description("old");
        patch.apply(&mut board);
        assert_eq!(board.description, None);
    }

    #[test]
    fn test_wip_limit_is_advisory() {
        let mut column = Column::new("b1", "Doing", 1);
        assert!(!column.is_over_limit(100));
        column.wip_limit = Some(2);
        assert!(!column.is_over_limit(2));
        assert!(column.is_over_limit(3));
    }
}
