//! AddUser command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::logged;
use crate::types::{User, UserId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Register a user. Emails are unique.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUser {
    /// Use this id instead of a generated one (e.g. to match the configured actor)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

operation!(AddUser, verb = "add", noun = "user", description = "Register a new user");

impl AddUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            name: None,
            image: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<UserId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddUser {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        logged(self, async {
            let email = self.email.trim().to_lowercase();
            if email.is_empty() {
                return Err(KanbanError::missing_field("email"));
            }
            if !email.contains('@') {
                return Err(KanbanError::invalid_value("email", format!("'{}' is not an email address", self.email)));
            }

            let mut user = User::new(email);
            user.name = self.name.clone();
            user.image = self.image.clone();
            if let Some(id) = &self.id {
                user.id = id.clone();
            }

            ctx.transaction(|tx| {
                if db::user::find_user(tx, &user.id)?.is_some() {
                    return Err(KanbanError::duplicate_id("user", user.id.as_str()));
                }
                db::user::insert_user(tx, &user)
            })
            .await?;

            info!(user = %user.id, "added user");
            Ok(serde_json::to_value(&user)?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_user_normalizes_email() {
        let ctx = KanbanContext::in_memory().unwrap();
        let result = AddUser::new(" Ana@Example.com ")
            .with_name("Ana")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["email"], "ana@example.com");
        assert_eq!(result["name"], "Ana");
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let ctx = KanbanContext::in_memory().unwrap();
        AddUser::new("ana@example.com").execute(&ctx).await.into_result().unwrap();
        let result = AddUser::new("ANA@example.com").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::DuplicateId { .. })));
    }

    #[tokio::test]
    async fn test_explicit_id_and_validation() {
        let ctx = KanbanContext::in_memory().unwrap();
        let result = AddUser::new("me@example.com")
            .with_id("local-user")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["id"], "local-user");

        let result = AddUser::new("not-an-email").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::InvalidValue { .. })));
    }
}
