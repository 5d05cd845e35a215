//! User rows

use super::{get_timestamp, timestamp};
use crate::error::{KanbanError, Result};
use crate::types::{User, UserId};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const USER_COLUMNS: &str = "id, name, email, image, created_at, updated_at";

/// Map a row selected with [`USER_COLUMNS`] starting at `offset`
pub(crate) fn user_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        email: row.get(offset + 2)?,
        image: row.get(offset + 3)?,
        created_at: get_timestamp(row, offset + 4)?,
        updated_at: get_timestamp(row, offset + 5)?,
    })
}

pub fn insert_user(conn: &Connection, user: &User) -> Result<()> {
    let taken: Option<String> = conn
        .query_row(
            "SELECT id FROM users WHERE email = ?1",
            [&user.email],
            |row| row.get(0),
        )
        .optional()?;
    if taken.is_some() {
        return Err(KanbanError::duplicate_id("user email", &user.email));
    }

    conn.execute(
        "INSERT INTO users (id, name, email, image, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user.id,
            user.name,
            user.email,
            user.image,
            timestamp(&user.created_at),
            timestamp(&user.updated_at),
        ],
    )?;
    Ok(())
}

pub fn find_user(conn: &Connection, id: &UserId) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
    Ok(conn
        .query_row(&sql, [id], |row| user_from_row(row, 0))
        .optional()?)
}

pub fn get_user(conn: &Connection, id: &UserId) -> Result<User> {
    find_user(conn, id)?.ok_or_else(|| KanbanError::user_not_found(id))
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY email");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| user_from_row(row, 0))?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}
