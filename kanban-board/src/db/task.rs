//! Task rows, sibling shifts and the task relation graph

use super::{
    get_index, get_opt_timestamp, get_opt_u32, get_timestamp, opt_timestamp, relation, sql_index,
    sql_opt_u32, timestamp,
};
use crate::error::{KanbanError, Result};
use crate::types::{BoardId, ColumnId, Shift, Task, TaskDetail, TaskId};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const TASK_COLUMNS: &str = "t.id, t.board_id, t.column_id, t.title, t.description, t.position, \
     t.priority, t.due_date, t.start_date, t.time_estimate, t.time_spent, t.is_archived, \
     t.created_at, t.updated_at";

pub(crate) fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        board_id: row.get(1)?,
        column_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        position: get_index(row, 5)?,
        priority: row.get(6)?,
        due_date: get_opt_timestamp(row, 7)?,
        start_date: get_opt_timestamp(row, 8)?,
        time_estimate: get_opt_u32(row, 9)?,
        time_spent: get_opt_u32(row, 10)?,
        is_archived: row.get(11)?,
        created_at: get_timestamp(row, 12)?,
        updated_at: get_timestamp(row, 13)?,
    })
}

pub fn insert_task(conn: &Connection, task: &Task) -> Result<()> {
    conn.execute(
        "INSERT INTO tasks (id, board_id, column_id, title, description, position, priority, due_date,
                            start_date, time_estimate, time_spent, is_archived, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            task.id,
            task.board_id,
            task.column_id,
            task.title,
            task.description,
            sql_index(task.position),
            task.priority,
            opt_timestamp(&task.due_date),
            opt_timestamp(&task.start_date),
            sql_opt_u32(task.time_estimate),
            sql_opt_u32(task.time_spent),
            task.is_archived,
            timestamp(&task.created_at),
            timestamp(&task.updated_at),
        ],
    )?;
    Ok(())
}

pub fn find_task(conn: &Connection, id: &TaskId) -> Result<Option<Task>> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM tasks t WHERE t.id = ?1");
    Ok(conn.query_row(&sql, [id], task_from_row).optional()?)
}

pub fn get_task(conn: &Connection, id: &TaskId) -> Result<Task> {
    find_task(conn, id)?.ok_or_else(|| KanbanError::task_not_found(id))
}

/// Tasks of one column in position order
pub fn tasks_in_column(conn: &Connection, column: &ColumnId) -> Result<Vec<Task>> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM tasks t WHERE t.column_id = ?1 ORDER BY t.position, t.rowid");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([column], task_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Tasks of a board ordered by column position, then task position
pub fn list_tasks(
    conn: &Connection,
    board: &BoardId,
    column: Option<&ColumnId>,
    include_archived: bool,
) -> Result<Vec<Task>> {
    let sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks t JOIN columns c ON c.id = t.column_id
         WHERE t.board_id = ?1 AND (?2 IS NULL OR t.column_id = ?2) AND (?3 OR t.is_archived = 0)
         ORDER BY c.position, t.position, t.rowid"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![board, column, include_archived], task_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Number of tasks in a column, archived ones included: they keep their slot
pub fn count_tasks(conn: &Connection, column: &ColumnId) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM tasks WHERE column_id = ?1",
        [column],
        |row| row.get(0),
    )?;
    Ok(usize::try_from(count).unwrap_or_default())
}

pub fn count_board_tasks(conn: &Connection, board: &BoardId) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM tasks WHERE board_id = ?1 AND is_archived = 0",
        [board],
        |row| row.get(0),
    )?;
    Ok(usize::try_from(count).unwrap_or_default())
}

/// Write the display fields. Column and position only change through [`set_location`].
pub fn update_task(conn: &Connection, task: &Task) -> Result<()> {
    conn.execute(
        "UPDATE tasks SET title = ?2, description = ?3, priority = ?4, due_date = ?5, start_date = ?6,
                          time_estimate = ?7, time_spent = ?8, is_archived = ?9, updated_at = ?10
         WHERE id = ?1",
        params![
            task.id,
            task.title,
            task.description,
            task.priority,
            opt_timestamp(&task.due_date),
            opt_timestamp(&task.start_date),
            sql_opt_u32(task.time_estimate),
            sql_opt_u32(task.time_spent),
            task.is_archived,
            timestamp(&task.updated_at),
        ],
    )?;
    Ok(())
}

/// Apply one sibling shift as a single range update. Returns the number of rows moved.
pub fn apply_shift(conn: &Connection, shift: &Shift) -> Result<usize> {
    let changed = conn.execute(
        "UPDATE tasks SET position = position + ?1
         WHERE column_id = ?2 AND position >= ?3 AND (?4 IS NULL OR position <= ?4)",
        params![
            shift.delta(),
            shift.column,
            sql_index(shift.from),
            shift.through.map(sql_index),
        ],
    )?;
    Ok(changed)
}

/// Write a task's column and position
pub fn set_location(
    conn: &Connection,
    id: &TaskId,
    column: &ColumnId,
    position: usize,
    updated_at: &DateTime<Utc>,
) -> Result<()> {
    conn.execute(
        "UPDATE tasks SET column_id = ?2, position = ?3, updated_at = ?4 WHERE id = ?1",
        params![id, column, sql_index(position), timestamp(updated_at)],
    )?;
    Ok(())
}

pub fn delete_task(conn: &Connection, id: &TaskId) -> Result<()> {
    conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
    Ok(())
}

/// Load a task with its full relation graph
pub fn task_detail(conn: &Connection, id: &TaskId) -> Result<TaskDetail> {
    let task = get_task(conn, id)?;
    let column = super::column::get_column(conn, &task.column_id)?;
    Ok(TaskDetail {
        column,
        assignees: relation::list_assignees(conn, id)?,
        labels: super::label::labels_for_task(conn, id)?,
        comments: relation::list_comments(conn, id)?,
        attachments: relation::list_attachments(conn, id)?,
        checklist_items: relation::list_checklist(conn, id)?,
        blocked_by: relation::blocking_tasks(conn, id)?,
        blocks: relation::dependent_tasks(conn, id)?,
        task,
    })
}
