//! Label rows and task ↔ label links

use crate::error::{KanbanError, Result};
use crate::types::{BoardId, Label, LabelId, TaskId};
use rusqlite::{params, Connection, OptionalExtension, Row};

fn label_from_row(row: &Row<'_>) -> rusqlite::Result<Label> {
    Ok(Label {
        id: row.get(0)?,
        board_id: row.get(1)?,
        name: row.get(2)?,
        color: row.get(3)?,
    })
}

pub fn insert_label(conn: &Connection, label: &Label) -> Result<()> {
    conn.execute(
        "INSERT INTO labels (id, board_id, name, color) VALUES (?1, ?2, ?3, ?4)",
        params![label.id, label.board_id, label.name, label.color],
    )?;
    Ok(())
}

pub fn get_label(conn: &Connection, id: &LabelId) -> Result<Label> {
    conn.query_row(
        "SELECT id, board_id, name, color FROM labels WHERE id = ?1",
        [id],
        label_from_row,
    )
    .optional()?
    .ok_or_else(|| KanbanError::not_found("label", id.as_str()))
}

pub fn list_labels(conn: &Connection, board: &BoardId) -> Result<Vec<Label>> {
    let mut stmt = conn.prepare(
        "SELECT id, board_id, name, color FROM labels WHERE board_id = ?1 ORDER BY name, rowid",
    )?;
    let rows = stmt.query_map([board], label_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn update_label(conn: &Connection, label: &Label) -> Result<()> {
    conn.execute(
        "UPDATE labels SET name = ?2, color = ?3 WHERE id = ?1",
        params![label.id, label.name, label.color],
    )?;
    Ok(())
}

pub fn delete_label(conn: &Connection, id: &LabelId) -> Result<()> {
    conn.execute("DELETE FROM labels WHERE id = ?1", [id])?;
    Ok(())
}

pub fn labels_for_task(conn: &Connection, task: &TaskId) -> Result<Vec<Label>> {
    let mut stmt = conn.prepare(
        "SELECT l.id, l.board_id, l.name, l.color FROM labels l
         JOIN task_labels tl ON tl.label_id = l.id
         WHERE tl.task_id = ?1 ORDER BY l.name, l.rowid",
    )?;
    let rows = stmt.query_map([task], label_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Link a label to a task. Returns false when the link already existed.
pub fn tag_task(conn: &Connection, task: &TaskId, label: &LabelId) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO task_labels (task_id, label_id) VALUES (?1, ?2)",
        params![task, label],
    )?;
    Ok(changed > 0)
}

/// Unlink a label from a task. Returns false when there was no link.
pub fn untag_task(conn: &Connection, task: &TaskId, label: &LabelId) -> Result<bool> {
    let changed = conn.execute(
        "DELETE FROM task_labels WHERE task_id = ?1 AND label_id = ?2",
        params![task, label],
    )?;
    Ok(changed > 0)
}
