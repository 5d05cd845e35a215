//! RemoveMember command

use super::membership;
use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, BoardId, BoardRole, UserId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Remove a user from a board. The last owner cannot be removed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMember {
    pub board_id: BoardId,
    pub user_id: UserId,
}

operation!(
    RemoveMember,
    verb = "remove",
    noun = "member",
    description = "Remove a user from a board"
);

impl RemoveMember {
    pub fn new(board: impl Into<BoardId>, user: impl Into<UserId>) -> Self {
        Self {
            board_id: board.into(),
            user_id: user.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for RemoveMember {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let actor = ctx.actor().clone();
            let member = ctx
                .transaction(|tx| {
                    let member = membership(tx, &self.board_id, &self.user_id)?;
                    if member.role == BoardRole::Owner
                        && db::board::count_owners(tx, &self.board_id)? <= 1
                    {
                        return Err(KanbanError::LastOwner {
                            board: self.board_id.to_string(),
                        });
                    }
                    db::board::delete_member(tx, &member.id)?;
                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::MemberRemoved,
                            format!("Removed {} from the board", self.user_id),
                            self.board_id.clone(),
                            actor,
                        )
                        .with_metadata(json!({ "userId": self.user_id })),
                    )?;
                    Ok(member)
                })
                .await?;
            Ok(json!({ "removed": true, "id": member.id, "userId": member.user_id }))
        })
        .await
    }
}
