//! Column rows and column-position maintenance

use super::{get_index, get_opt_u32, get_u64, sql_index, sql_opt_u32};
use crate::error::{KanbanError, Result};
use crate::types::{BoardId, Column, ColumnId, ShiftDirection};
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLUMN_COLUMNS: &str = "id, board_id, name, position, color, wip_limit, is_hidden, revision";

fn column_from_row(row: &Row<'_>) -> rusqlite::Result<Column> {
    Ok(Column {
        id: row.get(0)?,
        board_id: row.get(1)?,
        name: row.get(2)?,
        position: get_index(row, 3)?,
        color: row.get(4)?,
        wip_limit: get_opt_u32(row, 5)?,
        is_hidden: row.get(6)?,
        revision: get_u64(row, 7)?,
    })
}

pub fn insert_column(conn: &Connection, column: &Column) -> Result<()> {
    conn.execute(
        "INSERT INTO columns (id, board_id, name, position, color, wip_limit, is_hidden, revision)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            column.id,
            column.board_id,
            column.name,
            sql_index(column.position),
            column.color,
            sql_opt_u32(column.wip_limit),
            column.is_hidden,
            super::sql_u64(column.revision),
        ],
    )?;
    Ok(())
}

pub fn find_column(conn: &Connection, id: &ColumnId) -> Result<Option<Column>> {
    let sql = format!("SELECT {COLUMN_COLUMNS} FROM columns WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], column_from_row).optional()?)
}

pub fn get_column(conn: &Connection, id: &ColumnId) -> Result<Column> {
    find_column(conn, id)?.ok_or_else(|| KanbanError::column_not_found(id))
}

/// Columns of a board in display order
pub fn list_columns(conn: &Connection, board: &BoardId) -> Result<Vec<Column>> {
    let sql = format!("SELECT {COLUMN_COLUMNS} FROM columns WHERE board_id = ?1 ORDER BY position, rowid");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([board], column_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn count_columns(conn: &Connection, board: &BoardId) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM columns WHERE board_id = ?1",
        [board],
        |row| row.get(0),
    )?;
    Ok(usize::try_from(count).unwrap_or_default())
}

/// Write the display fields (name, color, WIP limit, hidden). Position and revision
/// have their own writers.
pub fn update_column(conn: &Connection, column: &Column) -> Result<()> {
    conn.execute(
        "UPDATE columns SET name = ?2, color = ?3, wip_limit = ?4, is_hidden = ?5 WHERE id = ?1",
        params![
            column.id,
            column.name,
            column.color,
            sql_opt_u32(column.wip_limit),
            column.is_hidden,
        ],
    )?;
    Ok(())
}

pub fn set_column_position(conn: &Connection, id: &ColumnId, position: usize) -> Result<()> {
    conn.execute(
        "UPDATE columns SET position = ?2 WHERE id = ?1",
        params![id, sql_index(position)],
    )?;
    Ok(())
}

/// Shift every column of `board` whose position lies in `from..=through` by one slot
pub fn shift_columns(
    conn: &Connection,
    board: &BoardId,
    from: usize,
    through: Option<usize>,
    direction: ShiftDirection,
) -> Result<usize> {
    let delta: i64 = match direction {
        ShiftDirection::Up => 1,
        ShiftDirection::Down => -1,
    };
    let changed = conn.execute(
        "UPDATE columns SET position = position + ?1
         WHERE board_id = ?2 AND position >= ?3 AND (?4 IS NULL OR position <= ?4)",
        params![delta, board, sql_index(from), through.map(sql_index)],
    )?;
    Ok(changed)
}

/// Increment the column's revision and return the new value
pub fn bump_revision(conn: &Connection, id: &ColumnId) -> Result<u64> {
    let revision: i64 = conn.query_row(
        "UPDATE columns SET revision = revision + 1 WHERE id = ?1 RETURNING revision",
        [id],
        |row| row.get(0),
    )?;
    Ok(u64::try_from(revision).unwrap_or_default())
}

pub fn delete_column(conn: &Connection, id: &ColumnId) -> Result<()> {
    conn.execute("DELETE FROM columns WHERE id = ?1", [id])?;
    Ok(())
}
