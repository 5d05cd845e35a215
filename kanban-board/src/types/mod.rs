//! Core types for the kanban engine

use serde::{Deserialize, Deserializer};

/// Declare a string-backed enum that round-trips through serde, `FromStr` and SQLite text.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $text)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The canonical upper-case name
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::KanbanError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err($crate::error::KanbanError::invalid_value(
                        stringify!($name),
                        format!("unknown value '{}'", s),
                    )),
                }
            }
        }

        impl ::rusqlite::types::ToSql for $name {
            fn to_sql(&self) -> ::rusqlite::Result<::rusqlite::types::ToSqlOutput<'_>> {
                Ok(::rusqlite::types::ToSqlOutput::from(self.as_str()))
            }
        }

        impl ::rusqlite::types::FromSql for $name {
            fn column_result(
                value: ::rusqlite::types::ValueRef<'_>,
            ) -> ::rusqlite::types::FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e| ::rusqlite::types::FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

mod activity;
mod board;
mod ids;
pub mod position;
mod task;

// Re-export all types
pub use activity::{Activity, ActivityType};
pub use board::{Board, BoardMember, BoardPatch, BoardRole, Column, ColumnPatch, Label, LabelPatch, User};
pub use ids::{
    ActivityId, AttachmentId, BoardId, ChecklistItemId, ColumnId, CommentId, LabelId, MemberId,
    TaskId, UserId,
};
pub use position::{MovePlan, Positioned, Shift, ShiftDirection};
pub use task::{
    Attachment, ChecklistItem, Comment, Priority, Task, TaskAssignee, TaskDetail, TaskPatch,
};

/// Deserialize a field that distinguishes "absent" (`None`) from "explicitly null" (`Some(None)`).
///
/// Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
