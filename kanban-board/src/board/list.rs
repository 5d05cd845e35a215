//! ListBoards command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

/// List the boards the acting user created or belongs to, most recently updated first
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBoards {
    /// Include archived boards
    #[serde(default)]
    pub include_archived: bool,
}

operation!(
    ListBoards,
    verb = "list",
    noun = "boards",
    description = "List boards visible to the acting user"
);

impl ListBoards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_archived(mut self, include_archived: bool) -> Self {
        self.include_archived = include_archived;
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListBoards {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            let actor = ctx.actor().clone();
            let boards = ctx
                .read(|conn| {
                    let mut boards = Vec::new();
                    for board in db::board::list_boards_for(conn, &actor, self.include_archived)? {
                        let columns = db::column::list_columns(conn, &board.id)?;
                        let task_count = db::task::count_board_tasks(conn, &board.id)?;
                        let mut value = serde_json::to_value(&board)?;
                        value["columns"] = serde_json::to_value(&columns)?;
                        value["taskCount"] = task_count.into();
                        boards.push(value);
                    }
                    Ok(boards)
                })
                .await?;

            debug!(count = boards.len(), "listed boards");
            Ok(json!({ "boards": boards, "count": boards.len() }))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CreateBoard, UpdateBoard};
    use crate::types::BoardPatch;

    #[tokio::test]
    async fn test_list_boards_for_actor() {
        let ctx = KanbanContext::in_memory().unwrap();
        CreateBoard::new("First").execute(&ctx).await.into_result().unwrap();
        CreateBoard::new("Second").execute(&ctx).await.into_result().unwrap();

        let other = ctx.clone().with_actor("someone-else");
        CreateBoard::new("Theirs").execute(&other).await.into_result().unwrap();

        let result = ListBoards::new().execute(&ctx).await.into_result().unwrap();
        assert_eq!(result["count"], 2);
        let boards = result["boards"].as_array().unwrap();
        assert_eq!(boards[0]["columns"].as_array().unwrap().len(), 3);
        assert_eq!(boards[0]["taskCount"], 0);
    }

    #[tokio::test]
    async fn test_archived_boards_hidden_by_default() {
        let ctx = KanbanContext::in_memory().unwrap();
        let board = CreateBoard::new("Old").execute(&ctx).await.into_result().unwrap();
        let patch = BoardPatch {
            is_archived: Some(true),
            ..Default::default()
        };
        UpdateBoard::new(board["id"].as_str().unwrap(), patch)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = ListBoards::new().execute(&ctx).await.into_result().unwrap();
        assert_eq!(result["count"], 0);

        let result = ListBoards::new()
            .with_archived(true)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["count"], 1);
    }
}
