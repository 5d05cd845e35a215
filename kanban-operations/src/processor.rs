//! Operation processing: execute, then persist the log entry

use crate::Execute;
use async_trait::async_trait;
use serde_json::Value;

/// Runs operations against a context and takes care of their audit trail.
///
/// Implementations decide where log entries go; callers only see the plain result.
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    /// Execute `operation` and record its log entry if it produced one
    async fn process<O>(&self, operation: &O, ctx: &C) -> Result<Value, E>
    where
        O: Execute<C, E> + Sync;
}
