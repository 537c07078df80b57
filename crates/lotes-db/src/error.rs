//! Database error types for lotes-db.

use lotes_core::errors::{CoreError, ErrorKind, PERSISTENCE_FAILURE_MESSAGE};
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Domain failure: validation, authorization, lookup, or version conflict.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<lotes_core::errors::ValidationError> for DatabaseError {
    fn from(err: lotes_core::errors::ValidationError) -> Self {
        Self::Core(CoreError::Validation(err))
    }
}

/// SQLite constraint failures the user can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Constraint {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl Constraint {
    fn detect(message: &str) -> Option<Self> {
        if message.contains("UNIQUE constraint failed") {
            Some(Self::Unique)
        } else if message.contains("FOREIGN KEY constraint failed") {
            Some(Self::ForeignKey)
        } else if message.contains("NOT NULL constraint failed") {
            Some(Self::NotNull)
        } else if message.contains("CHECK constraint failed") {
            Some(Self::Check)
        } else {
            None
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::Unique => "This record already exists",
            Self::ForeignKey => "This operation is not possible because of related records",
            Self::NotNull => "All required fields must be filled in",
            Self::Check => "The data provided is not valid",
        }
    }
}

impl DatabaseError {
    fn constraint(&self) -> Option<Constraint> {
        match self {
            Self::LibSql(e) => Constraint::detect(&e.to_string()),
            Self::Query(msg) => Constraint::detect(msg),
            _ => None,
        }
    }

    /// Coarse category deciding what the user is shown.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(e) => e.kind(),
            _ if self.constraint().is_some() => ErrorKind::Validation,
            _ => ErrorKind::Persistence,
        }
    }

    /// Message safe to show an end user. Persistence detail never leaks.
    #[must_use]
    pub fn user_message(&self) -> String {
        if let Self::Core(e) = self {
            return e.user_message();
        }
        match self.constraint() {
            Some(c) => c.message().to_string(),
            None => PERSISTENCE_FAILURE_MESSAGE.to_string(),
        }
    }

    /// The wrapped domain error, if any.
    #[must_use]
    pub const fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(e) => Some(e),
            _ => None,
        }
    }
}
