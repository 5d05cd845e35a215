//! Board membership commands. Every board keeps at least one OWNER.

mod add;
mod list;
mod remove;
mod update;

pub use add::AddMember;
pub use list::ListMembers;
pub use remove::RemoveMember;
pub use update::UpdateMemberRole;

use crate::db;
use crate::error::{KanbanError, Result};
use crate::types::{BoardId, BoardMember, UserId};
use rusqlite::Connection;

/// Load the membership of `user` on `board`
pub(crate) fn membership(conn: &Connection, board: &BoardId, user: &UserId) -> Result<BoardMember> {
    db::board::find_member(conn, board, user)?
        .ok_or_else(|| KanbanError::not_found("member", format!("{user} on board {board}")))
}
