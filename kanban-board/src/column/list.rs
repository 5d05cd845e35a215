//! ListColumns command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use crate::types::BoardId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List a board's columns in display order with task counts
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListColumns {
    pub board_id: BoardId,
}

operation!(
    ListColumns,
    verb = "list",
    noun = "columns",
    description = "List all columns of a board"
);

impl ListColumns {
    pub fn new(board: impl Into<BoardId>) -> Self {
        Self {
            board_id: board.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListColumns {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            let columns = ctx
                .read(|conn| {
                    db::board::get_board(conn, &self.board_id)?;
                    db::column::list_columns(conn, &self.board_id)?
                        .into_iter()
                        .map(|column| {
                            let count = db::task::count_tasks(conn, &column.id)?;
                            let mut value = serde_json::to_value(&column)?;
                            value["taskCount"] = count.into();
                            Ok(value)
                        })
                        .collect::<crate::Result<Vec<_>>>()
                })
                .await?;

            Ok(json!({ "columns": columns, "count": columns.len() }))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_list_columns() {
        let fx = Fixture::new().await;
        fx.add_task(2, "Shipped").await;

        let result = ListColumns::new(fx.board.clone())
            .execute(&fx.ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["count"], 3);
        let names: Vec<_> = result["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["To Do", "In Progress", "Done"]);
        assert_eq!(result["columns"][2]["taskCount"], 1);
    }
}
