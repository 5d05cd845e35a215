//! CreateBoard command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, Board, BoardMember, BoardRole, Column, MemberId};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Create a board with the default "To Do" / "In Progress" / "Done" columns.
///
/// The acting user becomes the board's creator and its first OWNER.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoard {
    /// The board name
    pub name: String,
    /// Optional board description
    #[serde(default)]
    pub description: Option<String>,
    /// Optional background (color or image URL)
    #[serde(default)]
    pub background: Option<String>,
}

operation!(
    CreateBoard,
    verb = "create",
    noun = "board",
    description = "Create a new kanban board"
);

impl CreateBoard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            background: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the background
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for CreateBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            if self.name.trim().is_empty() {
                return Err(KanbanError::missing_field("name"));
            }

            let actor = ctx.actor().clone();
            let mut board = Board::new(self.name.trim(), actor.clone());
            board.description = self.description.clone();
            board.background = self.background.clone();

            let columns: Vec<Column> = Board::default_columns()
                .iter()
                .enumerate()
                .map(|(position, (name, color))| {
                    Column::new(board.id.clone(), *name, position).with_color(*color)
                })
                .collect();

            ctx.transaction(|tx| {
                db::board::insert_board(tx, &board)?;
                for column in &columns {
                    db::column::insert_column(tx, column)?;
                }
                db::board::insert_member(
                    tx,
                    &BoardMember {
                        id: MemberId::new(),
                        board_id: board.id.clone(),
                        user_id: actor.clone(),
                        role: BoardRole::Owner,
                        joined_at: Utc::now(),
                        user: None,
                    },
                )?;
                db::activity::insert_activity(
                    tx,
                    &Activity::new(
                        ActivityType::BoardCreated,
                        format!("Created board \"{}\"", board.name),
                        board.id.clone(),
                        actor.clone(),
                    ),
                )
            })
            .await?;

            info!(board = %board.id, "created board");
            let mut result = serde_json::to_value(&board)?;
            result["columns"] = serde_json::to_value(&columns)?;
            Ok(result)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_operations::Operation;

    #[tokio::test]
    async fn test_create_board_with_default_columns() {
        let ctx = KanbanContext::in_memory().unwrap();

        let result = CreateBoard::new("Test Board")
            .with_description("A test board")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["name"], "Test Board");
        assert_eq!(result["description"], "A test board");
        assert_eq!(result["creatorId"], "local-user");

        let columns = result["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0]["name"], "To Do");
        assert_eq!(columns[0]["color"], "#60a5fa");
        assert_eq!(columns[1]["name"], "In Progress");
        assert_eq!(columns[2]["name"], "Done");
        assert_eq!(columns[2]["position"], 2);
    }

    #[tokio::test]
    async fn test_creator_becomes_owner() {
        let ctx = KanbanContext::in_memory().unwrap().with_actor("alice");
        let result = CreateBoard::new("Mine").execute(&ctx).await.into_result().unwrap();
        let board_id = crate::types::BoardId::from_string(result["id"].as_str().unwrap());

        let members = ctx
            .read(|conn| db::board::list_members(conn, &board_id))
            .await
            .unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].user_id, "alice");
        assert_eq!(members[0].role, BoardRole::Owner);
    }

    #[tokio::test]
    async fn test_create_board_requires_name() {
        let ctx = KanbanContext::in_memory().unwrap();
        let result = CreateBoard::new("  ").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::MissingField { .. })));
    }

    #[test]
    fn test_operation_metadata() {
        let op = CreateBoard::new("test");
        assert_eq!(op.verb(), "create");
        assert_eq!(op.noun(), "board");
        assert_eq!(op.op_string(), "create board");
    }
}
