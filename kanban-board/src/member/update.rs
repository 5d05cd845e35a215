//! UpdateMemberRole command

use super::membership;
use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{Activity, ActivityType, BoardId, BoardRole, UserId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Change a member's role. The last owner cannot be demoted.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRole {
    pub board_id: BoardId,
    pub user_id: UserId,
    pub role: BoardRole,
}

operation!(
    UpdateMemberRole,
    verb = "update",
    noun = "member",
    description = "Change a board member's role"
);

impl UpdateMemberRole {
    pub fn new(board: impl Into<BoardId>, user: impl Into<UserId>, role: BoardRole) -> Self {
        Self {
            board_id: board.into(),
            user_id: user.into(),
            role,
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateMemberRole {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let actor = ctx.actor().clone();
            let member = ctx
                .transaction(|tx| {
                    let member = membership(tx, &self.board_id, &self.user_id)?;
                    if member.role == self.role {
                        return Ok(member);
                    }
                    if member.role == BoardRole::Owner
                        && db::board::count_owners(tx, &self.board_id)? <= 1
                    {
                        return Err(KanbanError::LastOwner {
                            board: self.board_id.to_string(),
                        });
                    }

                    db::board::update_member_role(tx, &member.id, self.role)?;
                    db::activity::insert_activity(
                        tx,
                        &Activity::new(
                            ActivityType::MemberUpdated,
                            format!("Changed role of {} to {}", self.user_id, self.role),
                            self.board_id.clone(),
                            actor,
                        )
                        .with_metadata(json!({ "from": member.role, "to": self.role })),
                    )?;
                    db::board::get_member(tx, &member.id)
                })
                .await?;
            Ok(serde_json::to_value(&member)?)
        })
        .await
    }
}
