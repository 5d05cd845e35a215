//! Task-owned relations: assignees, comments, attachments, checklist items, dependencies

use super::task::{task_from_row, TASK_COLUMNS};
use super::user::{user_from_row, USER_COLUMNS};
use super::{get_index, get_timestamp, get_u64, sql_index, sql_u64, timestamp};
use crate::error::{KanbanError, Result};
use crate::types::{
    Attachment, AttachmentId, ChecklistItem, ChecklistItemId, Comment, CommentId, Task,
    TaskAssignee, TaskId, UserId,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

fn joined_user_columns() -> String {
    USER_COLUMNS
        .split(", ")
        .map(|column| format!("u.{column}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn optional_user(row: &Row<'_>, offset: usize) -> rusqlite::Result<Option<crate::types::User>> {
    let id: Option<String> = row.get(offset)?;
    match id {
        Some(_) => user_from_row(row, offset).map(Some),
        None => Ok(None),
    }
}

// Assignees

pub fn list_assignees(conn: &Connection, task: &TaskId) -> Result<Vec<TaskAssignee>> {
    let sql = format!(
        "SELECT a.task_id, a.user_id, a.assigned_at, {} FROM task_assignees a
         LEFT JOIN users u ON u.id = a.user_id
         WHERE a.task_id = ?1 ORDER BY a.assigned_at, a.rowid",
        joined_user_columns()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([task], |row| {
        Ok(TaskAssignee {
            task_id: row.get(0)?,
            user_id: row.get(1)?,
            assigned_at: get_timestamp(row, 2)?,
            user: optional_user(row, 3)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Returns false when the user was already assigned
pub fn assign(conn: &Connection, task: &TaskId, user: &UserId, at: &DateTime<Utc>) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO task_assignees (task_id, user_id, assigned_at) VALUES (?1, ?2, ?3)",
        params![task, user, timestamp(at)],
    )?;
    Ok(changed > 0)
}

/// Returns false when the user was not assigned
pub fn unassign(conn: &Connection, task: &TaskId, user: &UserId) -> Result<bool> {
    let changed = conn.execute(
        "DELETE FROM task_assignees WHERE task_id = ?1 AND user_id = ?2",
        params![task, user],
    )?;
    Ok(changed > 0)
}

// Comments

fn comment_select() -> String {
    format!(
        "SELECT c.id, c.task_id, c.user_id, c.content, c.created_at, c.updated_at, {}
         FROM comments c LEFT JOIN users u ON u.id = c.user_id",
        joined_user_columns()
    )
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        task_id: row.get(1)?,
        user_id: row.get(2)?,
        content: row.get(3)?,
        created_at: get_timestamp(row, 4)?,
        updated_at: get_timestamp(row, 5)?,
        user: optional_user(row, 6)?,
    })
}

pub fn insert_comment(conn: &Connection, comment: &Comment) -> Result<()> {
    conn.execute(
        "INSERT INTO comments (id, task_id, user_id, content, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            comment.id,
            comment.task_id,
            comment.user_id,
            comment.content,
            timestamp(&comment.created_at),
            timestamp(&comment.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_comment(conn: &Connection, id: &CommentId) -> Result<Comment> {
    let sql = format!("{} WHERE c.id = ?1", comment_select());
    conn.query_row(&sql, [id], comment_from_row)
        .optional()?
        .ok_or_else(|| KanbanError::not_found("comment", id.as_str()))
}

/// Comments on a task, oldest first
pub fn list_comments(conn: &Connection, task: &TaskId) -> Result<Vec<Comment>> {
    let sql = format!(
        "{} WHERE c.task_id = ?1 ORDER BY c.created_at, c.rowid",
        comment_select()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([task], comment_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn update_comment(conn: &Connection, comment: &Comment) -> Result<()> {
    conn.execute(
        "UPDATE comments SET content = ?2, updated_at = ?3 WHERE id = ?1",
        params![comment.id, comment.content, timestamp(&comment.updated_at)],
    )?;
    Ok(())
}

pub fn delete_comment(conn: &Connection, id: &CommentId) -> Result<()> {
    conn.execute("DELETE FROM comments WHERE id = ?1", [id])?;
    Ok(())
}

// Attachments

const ATTACHMENT_COLUMNS: &str = "id, task_id, name, url, size, mime_type, created_at";

fn attachment_from_row(row: &Row<'_>) -> rusqlite::Result<Attachment> {
    Ok(Attachment {
        id: row.get(0)?,
        task_id: row.get(1)?,
        name: row.get(2)?,
        url: row.get(3)?,
        size: get_u64(row, 4)?,
        mime_type: row.get(5)?,
        created_at: get_timestamp(row, 6)?,
    })
}

pub fn insert_attachment(conn: &Connection, attachment: &Attachment) -> Result<()> {
    conn.execute(
        "INSERT INTO attachments (id, task_id, name, url, size, mime_type, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            attachment.id,
            attachment.task_id,
            attachment.name,
            attachment.url,
            sql_u64(attachment.size),
            attachment.mime_type,
            timestamp(&attachment.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_attachment(conn: &Connection, id: &AttachmentId) -> Result<Attachment> {
    let sql = format!("SELECT {ATTACHMENT_COLUMNS} FROM attachments WHERE id = ?1");
    conn.query_row(&sql, [id], attachment_from_row)
        .optional()?
        .ok_or_else(|| KanbanError::not_found("attachment", id.as_str()))
}

pub fn list_attachments(conn: &Connection, task: &TaskId) -> Result<Vec<Attachment>> {
    let sql = format!(
        "SELECT {ATTACHMENT_COLUMNS} FROM attachments WHERE task_id = ?1 ORDER BY created_at, rowid"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([task], attachment_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn delete_attachment(conn: &Connection, id: &AttachmentId) -> Result<()> {
    conn.execute("DELETE FROM attachments WHERE id = ?1", [id])?;
    Ok(())
}

// Checklist

const CHECKLIST_COLUMNS: &str = "id, task_id, content, is_completed, position, created_at";

fn checklist_from_row(row: &Row<'_>) -> rusqlite::Result<ChecklistItem> {
    Ok(ChecklistItem {
        id: row.get(0)?,
        task_id: row.get(1)?,
        content: row.get(2)?,
        is_completed: row.get(3)?,
        position: get_index(row, 4)?,
        created_at: get_timestamp(row, 5)?,
    })
}

pub fn insert_checklist_item(conn: &Connection, item: &ChecklistItem) -> Result<()> {
    conn.execute(
        "INSERT INTO checklist_items (id, task_id, content, is_completed, position, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            item.id,
            item.task_id,
            item.content,
            item.is_completed,
            sql_index(item.position),
            timestamp(&item.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_checklist_item(conn: &Connection, id: &ChecklistItemId) -> Result<ChecklistItem> {
    let sql = format!("SELECT {CHECKLIST_COLUMNS} FROM checklist_items WHERE id = ?1");
    conn.query_row(&sql, [id], checklist_from_row)
        .optional()?
        .ok_or_else(|| KanbanError::not_found("checklist item", id.as_str()))
}

/// Checklist of a task in position order
pub fn list_checklist(conn: &Connection, task: &TaskId) -> Result<Vec<ChecklistItem>> {
    let sql = format!(
        "SELECT {CHECKLIST_COLUMNS} FROM checklist_items WHERE task_id = ?1 ORDER BY position, rowid"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([task], checklist_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn count_checklist(conn: &Connection, task: &TaskId) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM checklist_items WHERE task_id = ?1",
        [task],
        |row| row.get(0),
    )?;
    Ok(usize::try_from(count).unwrap_or_default())
}

pub fn update_checklist_item(conn: &Connection, item: &ChecklistItem) -> Result<()> {
    conn.execute(
        "UPDATE checklist_items SET content = ?2, is_completed = ?3 WHERE id = ?1",
        params![item.id, item.content, item.is_completed],
    )?;
    Ok(())
}

/// Delete an item and close the gap it leaves
pub fn delete_checklist_item(conn: &Connection, item: &ChecklistItem) -> Result<()> {
    conn.execute("DELETE FROM checklist_items WHERE id = ?1", [&item.id])?;
    conn.execute(
        "UPDATE checklist_items SET position = position - 1 WHERE task_id = ?1 AND position > ?2",
        params![item.task_id, sql_index(item.position)],
    )?;
    Ok(())
}

// Dependencies

/// Record that `dependent` is blocked by `blocking`. Returns false if already recorded.
pub fn insert_dependency(
    conn: &Connection,
    dependent: &TaskId,
    blocking: &TaskId,
    at: &DateTime<Utc>,
) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO task_dependencies (dependent_task_id, blocking_task_id, created_at)
         VALUES (?1, ?2, ?3)",
        params![dependent, blocking, timestamp(at)],
    )?;
    Ok(changed > 0)
}

/// Returns false when there was no such dependency
pub fn delete_dependency(conn: &Connection, dependent: &TaskId, blocking: &TaskId) -> Result<bool> {
    let changed = conn.execute(
        "DELETE FROM task_dependencies WHERE dependent_task_id = ?1 AND blocking_task_id = ?2",
        params![dependent, blocking],
    )?;
    Ok(changed > 0)
}

/// Ids of the tasks `task` directly waits on
pub fn blocking_ids(conn: &Connection, task: &TaskId) -> Result<Vec<TaskId>> {
    let mut stmt = conn.prepare(
        "SELECT blocking_task_id FROM task_dependencies WHERE dependent_task_id = ?1 ORDER BY rowid",
    )?;
    let rows = stmt.query_map([task], |row| row.get::<_, TaskId>(0))?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Tasks that must finish before `task`
pub fn blocking_tasks(conn: &Connection, task: &TaskId) -> Result<Vec<Task>> {
    let sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks t
         JOIN task_dependencies d ON d.blocking_task_id = t.id
         WHERE d.dependent_task_id = ?1 ORDER BY d.rowid"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([task], task_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Tasks waiting on `task`
pub fn dependent_tasks(conn: &Connection, task: &TaskId) -> Result<Vec<Task>> {
    let sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks t
         JOIN task_dependencies d ON d.dependent_task_id = t.id
         WHERE d.blocking_task_id = ?1 ORDER BY d.rowid"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([task], task_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}
