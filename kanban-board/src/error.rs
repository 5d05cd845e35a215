//! Error types for the kanban engine

use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Coarse classification of an error, for mapping onto a transport's status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced entity does not exist
    NotFound,
    /// The request was rejected before any state changed
    InvalidRequest,
    /// The request raced with another writer; retrying may succeed
    Conflict,
    /// A lower layer failed; nothing was committed
    Internal,
}

/// Errors that can occur in kanban operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Board not found
    #[error("board not found: {id}")]
    BoardNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// User not found
    #[error("user not found: {id}")]
    UserNotFound { id: String },

    /// Generic resource not found (labels, comments, attachments, ...)
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Missing required field
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// A destination index outside the valid range for its list
    #[error("{entity} position {position} out of range (max {max})")]
    PositionOutOfRange {
        entity: String,
        position: usize,
        max: usize,
    },

    /// A board must keep at least one column
    #[error("cannot delete the last column of board {board}")]
    LastColumn { board: String },

    /// Dependency cycle detected
    #[error("dependency cycle detected: {path}")]
    DependencyCycle { path: String },

    /// Duplicate ID or unique key
    #[error("duplicate {item_type}: {id}")]
    DuplicateId { item_type: String, id: String },

    /// A board must keep at least one owner
    #[error("board {board} must keep at least one owner")]
    LastOwner { board: String },

    /// The destination column changed since the caller last read it
    #[error("column {column} is at revision {actual}, expected {expected}")]
    StaleRevision {
        column: String,
        expected: u64,
        actual: u64,
    },

    /// The database is locked by another writer
    #[error("database busy - another operation in progress")]
    Busy,

    /// SQLite error
    #[error("database error: {0}")]
    Database(rusqlite::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<rusqlite::Error> for KanbanError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked) => {
                Self::Busy
            }
            _ => Self::Database(err),
        }
    }
}

impl From<figment::Error> for KanbanError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl KanbanError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    /// Create a generic not-found error
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    pub fn board_not_found(id: impl std::fmt::Display) -> Self {
        Self::BoardNotFound { id: id.to_string() }
    }

    pub fn column_not_found(id: impl std::fmt::Display) -> Self {
        Self::ColumnNotFound { id: id.to_string() }
    }

    pub fn task_not_found(id: impl std::fmt::Display) -> Self {
        Self::TaskNotFound { id: id.to_string() }
    }

    pub fn user_not_found(id: impl std::fmt::Display) -> Self {
        Self::UserNotFound { id: id.to_string() }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BoardNotFound { .. }
            | Self::ColumnNotFound { .. }
            | Self::TaskNotFound { .. }
            | Self::UserNotFound { .. }
            | Self::NotFound { .. } => ErrorKind::NotFound,
            Self::MissingField { .. }
            | Self::InvalidValue { .. }
            | Self::PositionOutOfRange { .. }
            | Self::LastColumn { .. }
            | Self::DependencyCycle { .. }
            | Self::DuplicateId { .. }
            | Self::LastOwner { .. } => ErrorKind::InvalidRequest,
            Self::StaleRevision { .. } | Self::Busy => ErrorKind::Conflict,
            Self::Database(_) | Self::Json(_) | Self::Io(_) | Self::Config(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Whether this error indicates a missing entity
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Busy | Self::StaleRevision { .. })
    }
}
