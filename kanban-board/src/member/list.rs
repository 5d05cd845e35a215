//! ListMembers command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use crate::types::BoardId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List a board's members, earliest first
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMembers {
    pub board_id: BoardId,
}

operation!(ListMembers, verb = "list", noun = "members", description = "List board members");

impl ListMembers {
    pub fn new(board: impl Into<BoardId>) -> Self {
        Self {
            board_id: board.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListMembers {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            let members = ctx
                .read(|conn| {
                    db::board::get_board(conn, &self.board_id)?;
                    db::board::list_members(conn, &self.board_id)
                })
                .await?;
            Ok(json!({ "members": members, "count": members.len() }))
        })
        .await
    }
}
