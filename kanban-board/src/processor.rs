//! Operation processor: executes commands and persists their log entries

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use kanban_operations::{async_trait, Execute, ExecutionResult, Operation, OperationProcessor};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::time::Instant;
use tracing::{info_span, warn, Instrument};

/// Runs kanban operations and writes their log entries to the `operation_log` table.
///
/// The acting user from the context is stamped on every entry. A failure to persist
/// the log never fails the operation itself; it has already committed.
#[derive(Debug, Default, Clone, Copy)]
pub struct KanbanOperationProcessor;

impl KanbanOperationProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OperationProcessor<KanbanContext, KanbanError> for KanbanOperationProcessor {
    async fn process<O>(&self, operation: &O, ctx: &KanbanContext) -> Result<Value>
    where
        O: Execute<KanbanContext, KanbanError> + Sync,
    {
        let span = info_span!("operation", op = %operation.op_string(), actor = %ctx.actor());

        async move {
            let started = Instant::now();
            let (result, log_entry) = operation.execute(ctx).await.split();

            if let Some(entry) = log_entry {
                let entry = entry.with_actor(ctx.actor().as_str());
                let affected = match &result {
                    Ok(value) => affected_ids(operation, value),
                    Err(_) => Vec::new(),
                };
                if let Err(e) = ctx.append_operation_log(&entry, &affected).await {
                    warn!(error = %e, "failed to persist operation log entry");
                }
            }

            tracing::debug!(
                duration_ms = started.elapsed().as_millis() as u64,
                ok = result.is_ok(),
                "operation finished"
            );
            result
        }
        .instrument(span)
        .await
    }
}

/// Resource ids for the log: the operation's own list, else the result's `id`
fn affected_ids<O>(operation: &O, value: &Value) -> Vec<String>
where
    O: Execute<KanbanContext, KanbanError>,
{
    let ids = operation.affected_resource_ids(value);
    if !ids.is_empty() {
        return ids;
    }
    value
        .get("id")
        .and_then(Value::as_str)
        .map(|id| vec![id.to_string()])
        .unwrap_or_default()
}

/// Run the body of a mutating command and wrap it as a logged result
pub(crate) async fn logged<O, F>(operation: &O, body: F) -> ExecutionResult<Value, KanbanError>
where
    O: Operation + Serialize,
    F: Future<Output = Result<Value>>,
{
    let started = Instant::now();
    let input = serde_json::to_value(operation).unwrap_or(Value::Null);
    let result = body.await;
    if let Err(e) = &result {
        warn!(op = %operation.op_string(), error = %e, "operation rejected");
    }
    ExecutionResult::logged(operation.op_string(), input, started, result)
}

/// Run the body of a read-only command
pub(crate) async fn unlogged<F>(body: F) -> ExecutionResult<Value, KanbanError>
where
    F: Future<Output = Result<Value>>,
{
    ExecutionResult::unlogged(body.await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::column::DeleteColumn;
    use crate::task::{AddTask, GetTask, MoveTask};

    #[tokio::test]
    async fn test_process_persists_logged_operations() {
        let ctx = KanbanContext::in_memory().unwrap().with_actor("alice");
        let processor = KanbanOperationProcessor::new();

        let board = processor
            .process(&CreateBoard::new("Roadmap"), &ctx)
            .await
            .unwrap();
        let board_id = board["id"].as_str().unwrap();
        let todo = board["columns"][0]["id"].as_str().unwrap();

        let task = processor
            .process(&AddTask::new(board_id, todo, "Draft"), &ctx)
            .await
            .unwrap();

        let log = ctx.read_operation_log(10).await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].op, "add task");
        assert_eq!(log[0].actor.as_deref(), Some("alice"));
        assert_eq!(log[1].op, "create board");

        // reads are not logged
        processor
            .process(&GetTask::new(task["id"].as_str().unwrap()), &ctx)
            .await
            .unwrap();
        assert_eq!(ctx.read_operation_log(10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_process_records_every_touched_resource() {
        let ctx = KanbanContext::in_memory().unwrap();
        let processor = KanbanOperationProcessor::new();

        let board = processor
            .process(&CreateBoard::new("Roadmap"), &ctx)
            .await
            .unwrap();
        let board_id = board["id"].as_str().unwrap();
        let todo = board["columns"][0]["id"].as_str().unwrap();
        let doing = board["columns"][1]["id"].as_str().unwrap();
        let task = processor
            .process(&AddTask::new(board_id, todo, "Draft"), &ctx)
            .await
            .unwrap();
        let task_id = task["id"].as_str().unwrap();

        let moved = processor
            .process(&MoveTask::new(task_id, doing, 0), &ctx)
            .await
            .unwrap();
        assert_eq!(moved["sourceColumnId"], todo);
        let entry = &ctx.read_operation_log(1).await.unwrap()[0];
        assert_eq!(entry.op, "move task");
        assert_eq!(
            ctx.operation_affected(&entry.id).await.unwrap(),
            vec![task_id, todo, doing]
        );

        processor
            .process(&DeleteColumn::new(doing), &ctx)
            .await
            .unwrap();
        let entry = &ctx.read_operation_log(1).await.unwrap()[0];
        assert_eq!(
            ctx.operation_affected(&entry.id).await.unwrap(),
            vec![doing, todo]
        );

        // commands without their own list fall back to the result id
        let entry = &ctx.read_operation_log(4).await.unwrap()[2];
        assert_eq!(entry.op, "add task");
        assert_eq!(ctx.operation_affected(&entry.id).await.unwrap(), vec![task_id]);
    }

    #[tokio::test]
    async fn test_process_logs_failures() {
        let ctx = KanbanContext::in_memory().unwrap();
        let processor = KanbanOperationProcessor::new();

        let result = processor
            .process(&AddTask::new("missing-board", "missing-column", "Draft"), &ctx)
            .await;
        assert!(result.is_err());

        let log = ctx.read_operation_log(10).await.unwrap();
        assert_eq!(log.len(), 1);
        assert!(log[0].is_failure());
    }
}
