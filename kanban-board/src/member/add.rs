//! AddMember command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, BoardId, BoardMember, BoardRole, MemberId, UserId};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Add an existing user to a board
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMember {
    pub board_id: BoardId,
    pub user_id: UserId,
    #[serde(default = "default_role")]
    pub role: BoardRole,
}

fn default_role() -> BoardRole {
    BoardRole::Member
}

operation!(AddMember, verb = "add", noun = "member", description = "Add a user to a board");

impl AddMember {
    pub fn new(board: impl Into<BoardId>, user: impl Into<UserId>) -> Self {
        Self {
            board_id: board.into(),
            user_id: user.into(),
            role: default_role(),
        }
    }

    pub fn with_role(mut self, role: BoardRole) -> Self {
        self.role = role;
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddMember {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let actor = ctx.actor().clone();
            let member = ctx
                .transaction(|tx| {
                    db::board::get_board(tx, &self.board_id)?;
                    let user = db::user::get_user(tx, &self.user_id)?;
                    let member = BoardMember {
                        id: MemberId::new(),
                        board_id: self.board_id.clone(),
                        user_id: user.id.clone(),
                        role: self.role,
                        joined_at: Utc::now(),
                        user: None,
                    };
                    db::board::insert_member(tx, &member)?;
                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::MemberAdded,
                            format!("Added {} as {}", user.display_name(), member.role),
                            self.board_id.clone(),
                            actor,
                        )
                        .with_metadata(json!({ "userId": user.id, "role": member.role })),
                    )?;
                    db::board::get_member(tx, &member.id)
                })
                .await?;
            Ok(serde_json::to_value(&member)?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use crate::user::AddUser;

    #[tokio::test]
    async fn test_add_member() {
        let fx = Fixture::new().await;
        let user = AddUser::new("bo@example.com").execute(&fx.ctx).await.into_result().unwrap();
        let user_id = user["id"].as_str().unwrap();

        let result = AddMember::new(fx.board.clone(), user_id)
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["role"], "MEMBER");
        assert_eq!(result["user"]["email"], "bo@example.com");

        let again = AddMember::new(fx.board.clone(), user_id)
            .with_role(BoardRole::Admin)
            .execute(&fx.ctx)
            .await
            .into_result();
        assert!(matches!(again, Err(KanbanError::DuplicateId { .. })));
    }

    #[tokio::test]
    async fn test_add_unknown_user() {
        let fx = Fixture::new().await;
        let result = AddMember::new(fx.board.clone(), "ghost")
            .execute(&fx.ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::UserNotFound { .. })));
    }
}
