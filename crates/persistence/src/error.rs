// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;
use pedregal::StoreError;
use thiserror::Error;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// Database connection failed.
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// Initialization error.
    #[error("Initialization error: {0}")]
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    #[error("Foreign key enforcement is not enabled")]
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),
    /// A uniqueness or referential constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),
    /// A worker row holds a status or hall outside the known values.
    #[error("Unrecognized {field} value '{value}' stored for worker {worker}")]
    UnrecognizedState {
        worker: String,
        field: &'static str,
        value: String,
    },
    /// A stored identifier, date or timestamp cannot be decoded.
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
    /// A value could not be encoded for storage.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation,
                info,
            ) => Self::Conflict(info.message().to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<time::error::Format> for PersistenceError {
    fn from(err: time::error::Format) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::UnrecognizedState {
                worker,
                field,
                value,
            } => Self::UnrecognizedState {
                worker,
                field,
                value,
            },
            PersistenceError::Conflict(msg) => Self::Conflict(msg),
            PersistenceError::NotFound(msg) => Self::Missing(msg),
            other => Self::Backend(other.to_string()),
        }
    }
}
