//! KanbanContext - I/O primitives for kanban storage
//!
//! The context owns the SQLite connection, the board event channel and the acting user.
//! No business logic methods, just data access primitives. Commands do all the work.

use crate::config::KanbanConfig;
use crate::db;
use crate::error::Result;
use crate::notify::BoardEvent;
use crate::types::UserId;
use kanban_operations::LogEntry;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, trace};

/// Context passed to every command - provides access, not logic.
///
/// Cloning is cheap; clones share the connection and the event channel.
#[derive(Clone)]
pub struct KanbanContext {
    conn: Arc<Mutex<Connection>>,
    events: broadcast::Sender<BoardEvent>,
    actor: UserId,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for KanbanContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KanbanContext")
            .field("path", &self.path)
            .field("actor", &self.actor)
            .finish_non_exhaustive()
    }
}

impl KanbanContext {
    /// Open (or create) a database file with default settings
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let config = KanbanConfig {
            database: path.as_ref().to_path_buf(),
            ..KanbanConfig::default()
        };
        Self::open_with_config(&config)
    }

    /// Open the database named by `config`, creating the schema if needed
    pub fn open_with_config(config: &KanbanConfig) -> Result<Self> {
        if let Some(parent) = config.database.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&config.database)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        debug!(path = %config.database.display(), "opened kanban database");
        let mut ctx = Self::from_connection(conn, config)?;
        ctx.path = Some(config.database.clone());
        Ok(ctx)
    }

    /// A private in-memory database, for tests and scratch boards
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, &KanbanConfig::default())
    }

    fn from_connection(conn: Connection, config: &KanbanConfig) -> Result<Self> {
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        db::schema::create_schema(&conn)?;

        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            events,
            actor: UserId::from_string(config.actor.clone()),
            path: None,
        })
    }

    /// Act as a different user. Shares the connection and event channel.
    pub fn with_actor(mut self, actor: impl Into<UserId>) -> Self {
        self.actor = actor.into();
        self
    }

    /// The acting user (authentication is stubbed)
    pub fn actor(&self) -> &UserId {
        &self.actor
    }

    /// The database file, `None` for in-memory contexts
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Receive every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Publish a committed change. Having no subscribers is fine.
    pub fn publish(&self, event: BoardEvent) {
        match self.events.send(event) {
            Ok(receivers) => trace!(receivers, "published board event"),
            Err(_) => trace!("no subscribers for board event"),
        }
    }

    // =========================================================================
    // Database access
    // =========================================================================

    /// Run read-only work against the connection
    pub async fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send,
        T: Send,
    {
        let conn = self.conn.lock().await;
        f(&conn)
    }

    /// Run `f` inside one `BEGIN IMMEDIATE` transaction.
    ///
    /// Commits when `f` returns `Ok`; any error rolls every write back.
    pub async fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T> + Send,
        T: Send,
    {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    // =========================================================================
    // Operation log
    // =========================================================================

    /// Persist a processor log entry with the resource ids it touched
    pub async fn append_operation_log(&self, entry: &LogEntry, affected: &[String]) -> Result<()> {
        self.transaction(|tx| db::activity::append_operation_log(tx, entry, affected))
            .await
    }

    /// Resource ids recorded with the log entry `id`
    pub async fn operation_affected(&self, id: &str) -> Result<Vec<String>> {
        self.read(|conn| db::activity::operation_affected(conn, id))
            .await
    }

    /// The most recent `limit` log entries, newest first
    pub async fn read_operation_log(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.read(|conn| db::activity::read_operation_log(conn, limit))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KanbanError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_in_memory_context_has_schema() {
        let ctx = KanbanContext::in_memory().unwrap();
        let count: i64 = ctx
            .read(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?)
            })
            .await
            .unwrap();
        assert_eq!(count, 0);
        assert_eq!(ctx.actor(), "local-user");
        assert!(ctx.path().is_none());
    }

    #[tokio::test]
    async fn test_transaction_rolls_back_on_error() {
        let ctx = KanbanContext::in_memory().unwrap();
        let result: Result<()> = ctx
            .transaction(|tx| {
                tx.execute(
                    "INSERT INTO users (id, email, created_at, updated_at) VALUES ('u1', 'a@b.c', 'x', 'x')",
                    [],
                )?;
                Err(KanbanError::missing_field("anything"))
            })
            .await;
        assert!(result.is_err());

        let count: i64 = ctx
            .read(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?))
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_open_file_database_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("kanban.db");
        {
            let ctx = KanbanContext::open(&path).unwrap();
            let entry = LogEntry::new("add task", serde_json::json!({}), serde_json::json!({}), None, 1);
            ctx.append_operation_log(&entry, &["t1".to_string()]).await.unwrap();
        }

        let ctx = KanbanContext::open(&path).unwrap().with_actor("alice");
        assert_eq!(ctx.actor(), "alice");
        let log = ctx.read_operation_log(10).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].op, "add task");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_fine() {
        let ctx = KanbanContext::in_memory().unwrap();
        ctx.publish(BoardEvent::ColumnDeleted {
            column_id: "c".into(),
            board_id: "b".into(),
        });

        let mut rx = ctx.subscribe();
        ctx.publish(BoardEvent::ColumnDeleted {
            column_id: "c".into(),
            board_id: "b".into(),
        });
        assert!(matches!(rx.recv().await.unwrap(), BoardEvent::ColumnDeleted { .. }));
    }
}
