//! GetUser command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use crate::types::UserId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get a user by id
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUser {
    pub id: UserId,
}

operation!(GetUser, verb = "get", noun = "user", description = "Retrieve a user by ID");

impl GetUser {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetUser {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            let user = ctx.read(|conn| db::user::get_user(conn, &self.id)).await?;
            Ok(serde_json::to_value(&user)?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::AddUser;

    #[tokio::test]
    async fn test_get_user() {
        let ctx = KanbanContext::in_memory().unwrap();
        let added = AddUser::new("a@b.c").execute(&ctx).await.into_result().unwrap();

        let result = GetUser::new(added["id"].as_str().unwrap())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["email"], "a@b.c");

        let missing = GetUser::new("nobody").execute(&ctx).await.into_result();
        assert!(matches!(missing, Err(KanbanError::UserNotFound { .. })));
    }
}
