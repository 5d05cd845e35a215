//! GetColumn command

use crate::context::KanbanContext;
use crate::db;
use crate::error::KanbanError;
use crate::processor::unlogged;
use crate::types::ColumnId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get a column with its tasks in position order
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetColumn {
    pub id: ColumnId,
}

operation!(GetColumn, verb = "get", noun = "column", description = "Retrieve a column by ID");

impl GetColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(async {
            ctx.read(|conn| {
                let column = db::column::get_column(conn, &self.id)?;
                let tasks = db::task::tasks_in_column(conn, &self.id)?;
                let mut result = serde_json::to_value(&column)?;
                result["taskCount"] = tasks.len().into();
                result["overLimit"] = column.is_over_limit(tasks.len()).into();
                result["tasks"] = serde_json::to_value(&tasks)?;
                Ok(result)
            })
            .await
        })
        .await
    }
}
