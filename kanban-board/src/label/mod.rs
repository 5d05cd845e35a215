//! Label commands: board label CRUD and task tagging

mod add;
mod color;
mod delete;
mod list;
mod tag;
mod untag;
mod update;

pub use add::AddLabel;
pub use color::label_color;
pub use delete::DeleteLabel;
pub use list::ListLabels;
pub use tag::TagTask;
pub use untag::UntagTask;
pub use update::UpdateLabel;

use crate::db;
use crate::error::{KanbanError, Result};
use crate::types::{BoardId, Label, LabelId};
use rusqlite::Connection;

/// Load a label and check it belongs to `board`
pub(crate) fn board_label(conn: &Connection, id: &LabelId, board: &BoardId) -> Result<Label> {
    let label = db::label::get_label(conn, id)?;
    if &label.board_id != board {
        return Err(KanbanError::invalid_value(
            "labelId",
            format!("label {} belongs to another board", label.id),
        ));
    }
    Ok(label)
}
