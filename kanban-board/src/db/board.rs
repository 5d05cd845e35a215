//! Board and membership rows

use super::user::{user_from_row, USER_COLUMNS};
use super::{get_timestamp, timestamp};
use crate::error::{KanbanError, Result};
use crate::types::{Board, BoardId, BoardMember, BoardRole, MemberId, UserId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const BOARD_COLUMNS: &str =
    "b.id, b.name, b.description, b.background, b.is_archived, b.creator_id, b.created_at, b.updated_at";

fn board_from_row(row: &Row<'_>) -> rusqlite::Result<Board> {
    Ok(Board {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        background: row.get(3)?,
        is_archived: row.get(4)?,
        creator_id: row.get(5)?,
        created_at: get_timestamp(row, 6)?,
        updated_at: get_timestamp(row, 7)?,
    })
}

pub fn insert_board(conn: &Connection, board: &Board) -> Result<()> {
    conn.execute(
        "INSERT INTO boards (id, name, description, background, is_archived, creator_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            board.id,
            board.name,
            board.description,
            board.background,
            board.is_archived,
            board.creator_id,
            timestamp(&board.created_at),
            timestamp(&board.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_board(conn: &Connection, id: &BoardId) -> Result<Board> {
    let sql = format!("SELECT {BOARD_COLUMNS} FROM boards b WHERE b.id = ?1");
    conn.query_row(&sql, [id], board_from_row)
        .optional()?
        .ok_or_else(|| KanbanError::board_not_found(id))
}

/// Boards created by `user` or where `user` is a member, most recently updated first
pub fn list_boards_for(conn: &Connection, user: &UserId, include_archived: bool) -> Result<Vec<Board>> {
    let sql = format!(
        "SELECT {BOARD_COLUMNS} FROM boards b
         WHERE (b.creator_id = ?1
                OR EXISTS (SELECT 1 FROM board_members m WHERE m.board_id = b.id AND m.user_id = ?1))
           AND (?2 OR b.is_archived = 0)
         ORDER BY b.updated_at DESC, b.rowid DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user, include_archived], board_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn update_board(conn: &Connection, board: &Board) -> Result<()> {
    conn.execute(
        "UPDATE boards SET name = ?2, description = ?3, background = ?4, is_archived = ?5, updated_at = ?6
         WHERE id = ?1",
        params![
            board.id,
            board.name,
            board.description,
            board.background,
            board.is_archived,
            timestamp(&board.updated_at),
        ],
    )?;
    Ok(())
}

/// Delete a board and everything it owns.
///
/// Tasks go before columns so the task → column reference never dangles.
pub fn delete_board(conn: &Connection, id: &BoardId) -> Result<()> {
    conn.execute("DELETE FROM tasks WHERE board_id = ?1", [id])?;
    conn.execute("DELETE FROM columns WHERE board_id = ?1", [id])?;
    conn.execute("DELETE FROM activities WHERE board_id = ?1", [id])?;
    conn.execute("DELETE FROM boards WHERE id = ?1", [id])?;
    Ok(())
}

const MEMBER_COLUMNS: &str = "m.id, m.board_id, m.user_id, m.role, m.joined_at";

fn member_from_row(row: &Row<'_>) -> rusqlite::Result<BoardMember> {
    // LEFT JOIN users: the user columns are NULL for members without a user row
    let user_id: Option<String> = row.get(5)?;
    let user = match user_id {
        Some(_) => Some(user_from_row(row, 5)?),
        None => None,
    };
    Ok(BoardMember {
        id: row.get(0)?,
        board_id: row.get(1)?,
        user_id: row.get(2)?,
        role: row.get(3)?,
        joined_at: get_timestamp(row, 4)?,
        user,
    })
}

fn member_select() -> String {
    let user_columns = USER_COLUMNS
        .split(", ")
        .map(|column| format!("u.{column}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "SELECT {MEMBER_COLUMNS}, {user_columns} FROM board_members m LEFT JOIN users u ON u.id = m.user_id"
    )
}

pub fn insert_member(conn: &Connection, member: &BoardMember) -> Result<()> {
    if find_member(conn, &member.board_id, &member.user_id)?.is_some() {
        return Err(KanbanError::duplicate_id("board member", member.user_id.as_str()));
    }
    conn.execute(
        "INSERT INTO board_members (id, board_id, user_id, role, joined_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            member.id,
            member.board_id,
            member.user_id,
            member.role,
            timestamp(&member.joined_at),
        ],
    )?;
    Ok(())
}

pub fn find_member(conn: &Connection, board: &BoardId, user: &UserId) -> Result<Option<BoardMember>> {
    let sql = format!("{} WHERE m.board_id = ?1 AND m.user_id = ?2", member_select());
    Ok(conn
        .query_row(&sql, params![board, user], member_from_row)
        .optional()?)
}

pub fn get_member(conn: &Connection, id: &MemberId) -> Result<BoardMember> {
    let sql = format!("{} WHERE m.id = ?1", member_select());
    conn.query_row(&sql, [id], member_from_row)
        .optional()?
        .ok_or_else(|| KanbanError::not_found("member", id.as_str()))
}

/// Members of a board, oldest first
pub fn list_members(conn: &Connection, board: &BoardId) -> Result<Vec<BoardMember>> {
    let sql = format!(
        "{} WHERE m.board_id = ?1 ORDER BY m.joined_at, m.rowid",
        member_select()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([board], member_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn update_member_role(conn: &Connection, id: &MemberId, role: BoardRole) -> Result<()> {
    conn.execute(
        "UPDATE board_members SET role = ?2 WHERE id = ?1",
        params![id, role],
    )?;
    Ok(())
}

pub fn delete_member(conn: &Connection, id: &MemberId) -> Result<()> {
    conn.execute("DELETE FROM board_members WHERE id = ?1", [id])?;
    Ok(())
}

pub fn count_owners(conn: &Connection, board: &BoardId) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM board_members WHERE board_id = ?1 AND role = ?2",
        params![board, BoardRole::Owner],
        |row| row.get(0),
    )?;
    Ok(usize::try_from(count).unwrap_or_default())
}
