//! GetBoard command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use crate::types::BoardId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get a board with its columns (in display order, with task counts), members and labels
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBoard {
    pub id: BoardId,
}

operation!(
    GetBoard,
    verb = "get",
    noun = "board",
    description = "Retrieve a board with columns, members and labels"
);

impl GetBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            ctx.read(|conn| {
                let board = db::board::get_board(conn, &self.id)?;
                let mut columns = Vec::new();
                for column in db::column::list_columns(conn, &self.id)? {
                    let count = db::task::count_tasks(conn, &column.id)?;
                    let mut value = serde_json::to_value(&column)?;
                    value["taskCount"] = count.into();
                    columns.push(value);
                }

                let mut result = serde_json::to_value(&board)?;
                result["columns"] = Value::Array(columns);
                result["members"] = serde_json::to_value(db::board::list_members(conn, &self.id)?)?;
                result["labels"] = serde_json::to_value(db::label::list_labels(conn, &self.id)?)?;
                Ok(result)
            })
            .await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_get_board_with_counts() {
        let fx = Fixture::new().await;
        fx.add_task(0, "One").await;
        fx.add_task(0, "Two").await;
        fx.add_task(2, "Three").await;

        let result = GetBoard::new(fx.board.clone())
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["name"], "Test");
        let columns = result["columns"].as_array().unwrap();
        assert_eq!(columns[0]["taskCount"], 2);
        assert_eq!(columns[1]["taskCount"], 0);
        assert_eq!(columns[2]["taskCount"], 1);
        assert_eq!(result["members"].as_array().unwrap().len(), 1);
        assert!(result["labels"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_board() {
        let ctx = KanbanContext::in_memory().unwrap();
        let result = GetBoard::new("nope").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::BoardNotFound { .. })));
    }
}
