//! Activity feed and operation log rows

use super::{get_timestamp, get_u64, sql_index, sql_u64, timestamp};
use crate::error::{KanbanError, Result};
use crate::types::{Activity, BoardId, TaskId};
use kanban_operations::LogEntry;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::Value;

fn json_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Value> {
    let text: String = row.get(idx)?;
    serde_json::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn activity_from_row(row: &Row<'_>) -> rusqlite::Result<Activity> {
    let metadata: Option<String> = row.get(3)?;
    let metadata = match metadata {
        Some(_) => Some(json_column(row, 3)?),
        None => None,
    };
    Ok(Activity {
        id: row.get(0)?,
        activity_type: row.get(1)?,
        content: row.get(2)?,
        metadata,
        board_id: row.get(4)?,
        task_id: row.get(5)?,
        user_id: row.get(6)?,
        created_at: get_timestamp(row, 7)?,
    })
}

pub fn insert_activity(conn: &Connection, activity: &Activity) -> Result<()> {
    let metadata = activity
        .metadata
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    conn.execute(
        "INSERT INTO activities (id, type, content, metadata, board_id, task_id, user_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            activity.id,
            activity.activity_type,
            activity.content,
            metadata,
            activity.board_id,
            activity.task_id,
            activity.user_id,
            timestamp(&activity.created_at),
        ],
    )?;
    Ok(())
}

/// A board's feed, newest first
pub fn list_activity(
    conn: &Connection,
    board: &BoardId,
    task: Option<&TaskId>,
    limit: Option<usize>,
) -> Result<Vec<Activity>> {
    let mut stmt = conn.prepare(
        "SELECT id, type, content, metadata, board_id, task_id, user_id, created_at FROM activities
         WHERE board_id = ?1 AND (?2 IS NULL OR task_id = ?2)
         ORDER BY rowid DESC LIMIT ?3",
    )?;
    let limit = limit.map(sql_index).unwrap_or(-1);
    let rows = stmt.query_map(params![board, task, limit], activity_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn append_operation_log(conn: &Connection, entry: &LogEntry, affected: &[String]) -> Result<()> {
    conn.execute(
        "INSERT INTO operation_log (id, timestamp, op, input, output, actor, duration_ms, affected)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            entry.id,
            timestamp(&entry.timestamp),
            entry.op,
            serde_json::to_string(&entry.input)?,
            serde_json::to_string(&entry.output)?,
            entry.actor,
            sql_u64(entry.duration_ms),
            serde_json::to_string(affected)?,
        ],
    )?;
    Ok(())
}

/// Resource ids recorded with the log entry `id`
pub fn operation_affected(conn: &Connection, id: &str) -> Result<Vec<String>> {
    let affected: Option<String> = conn
        .query_row("SELECT affected FROM operation_log WHERE id = ?1", [id], |row| row.get(0))
        .optional()?;
    match affected {
        Some(text) => Ok(serde_json::from_str(&text)?),
        None => Err(KanbanError::not_found("operation", id)),
    }
}

/// The most recent `limit` log entries, newest first
pub fn read_operation_log(conn: &Connection, limit: usize) -> Result<Vec<LogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, timestamp, op, input, output, actor, duration_ms FROM operation_log
         ORDER BY rowid DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map([sql_index(limit)], |row| {
        Ok(LogEntry {
            id: row.get(0)?,
            timestamp: get_timestamp(row, 1)?,
            op: row.get(2)?,
            input: json_column(row, 3)?,
            output: json_column(row, 4)?,
            actor: row.get(5)?,
            duration_ms: get_u64(row, 6)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}
