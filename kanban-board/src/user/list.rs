//! ListUsers command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List every user, by email
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListUsers;

operation!(ListUsers, verb = "list", noun = "users", description = "List all users");

impl ListUsers {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListUsers {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            let users = ctx.read(db::user::list_users).await?;
            Ok(json!({ "users": users, "count": users.len() }))
        })
        .await
    }
}
