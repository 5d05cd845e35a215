//! Operation metadata and the execution trait

use crate::ExecutionResult;
use async_trait::async_trait;
use serde_json::Value;

/// Metadata shared by every operation.
///
/// Normally implemented through the [`operation!`](crate::operation) macro rather than by hand.
pub trait Operation: Send + Sync {
    /// The verb, e.g. "add" or "move"
    fn verb(&self) -> &'static str;

    /// The noun, e.g. "task" or "column"
    fn noun(&self) -> &'static str;

    /// Short human-readable description
    fn description(&self) -> &'static str;

    /// Canonical op string used in logs ("move task")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute an operation against a context `C`, failing with `E`
#[async_trait]
pub trait Execute<C, E>: Operation
where
    C: Send + Sync,
    E: Send,
{
    /// Run the operation
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;

    /// Resource IDs touched by this operation, recorded alongside its log entry
    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        Vec::new()
    }
}

/// Implement [`Operation`] for a struct.
///
/// ```ignore
/// operation!(MoveTask, verb = "move", noun = "task", description = "Move a task");
/// ```
#[macro_export]
macro_rules! operation {
    ($ty:ty, verb = $verb:literal, noun = $noun:literal, description = $desc:literal $(,)?) => {
        impl $crate::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $desc
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;

    operation!(Ping, verb = "ping", noun = "board", description = "Check the board");

    #[async_trait]
    impl Execute<(), String> for Ping {
        async fn execute(&self, _ctx: &()) -> ExecutionResult<Value, String> {
            ExecutionResult::Unlogged {
                value: serde_json::json!("pong"),
            }
        }
    }

    #[test]
    fn test_op_string() {
        assert_eq!(Ping.op_string(), "ping board");
        assert_eq!(Ping.description(), "Check the board");
    }

    #[tokio::test]
    async fn test_execute_default_resources() {
        let result = Ping.execute(&()).await.into_result().unwrap();
        assert_eq!(result, "pong");
        assert!(Ping.affected_resource_ids(&result).is_empty());
    }
}
