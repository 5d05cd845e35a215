//! SQLite row access for the kanban engine.
//!
//! Every function here takes a `&Connection` (a `Transaction` derefs to one) and does
//! exactly one thing: no business rules, no activity records. Commands compose these
//! inside a single transaction.
//!
//! # Schema
//!
//! - `users`, `boards`, `board_members`
//! - `columns` (dense `position` per board, `revision` per column)
//! - `tasks` (dense `position` per column)
//! - `task_assignees`, `labels`, `task_labels`, `comments`, `attachments`,
//!   `checklist_items`, `task_dependencies`
//! - `activities` (board feed), `operation_log` (processor audit trail)

pub mod activity;
pub mod board;
pub mod column;
pub mod label;
pub mod relation;
pub mod schema;
pub mod task;
pub mod user;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

/// Render a timestamp the way it is stored: RFC 3339, microseconds, `Z` suffix
pub(crate) fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn opt_timestamp(value: &Option<DateTime<Utc>>) -> Option<String> {
    value.as_ref().map(timestamp)
}

/// Read a stored timestamp column
pub(crate) fn get_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    parse_timestamp(idx, &text)
}

pub(crate) fn get_opt_timestamp(
    row: &Row<'_>,
    idx: usize,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|text| parse_timestamp(idx, &text)).transpose()
}

fn parse_timestamp(idx: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read a non-negative integer column (positions, counts)
pub(crate) fn get_index(row: &Row<'_>, idx: usize) -> rusqlite::Result<usize> {
    let value: i64 = row.get(idx)?;
    usize::try_from(value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

pub(crate) fn get_opt_u32(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<u32>> {
    let value: Option<i64> = row.get(idx)?;
    value
        .map(|v| {
            u32::try_from(v).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e))
            })
        })
        .transpose()
}

pub(crate) fn get_u64(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let value: i64 = row.get(idx)?;
    u64::try_from(value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

/// Convert an index for binding. Positions never approach `i64::MAX`.
pub(crate) fn sql_index(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Convert a count for binding
pub(crate) fn sql_u64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub(crate) fn sql_opt_u32(value: Option<u32>) -> Option<i64> {
    value.map(i64::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_round_trip_through_sqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let now = Utc::now();
        let back = conn
            .query_row("SELECT ?1", [timestamp(&now)], |row| get_timestamp(row, 0))
            .unwrap();
        assert_eq!(back.timestamp_micros(), now.timestamp_micros());
    }

    #[test]
    fn test_negative_index_is_rejected() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let result = conn.query_row("SELECT -1", [], |row| get_index(row, 0));
        assert!(result.is_err());
    }
}
