// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pedregal_domain::DomainError;
use thiserror::Error;
use tracing::error;

/// Failures reported by a store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A stored status or hall value is outside the known enums.
    #[error("Unrecognized {field} value '{value}' stored for worker {worker}")]
    UnrecognizedState {
        /// The worker whose record is corrupt.
        worker: String,
        /// The column that holds the value.
        field: &'static str,
        /// The stored value.
        value: String,
    },
    /// A uniqueness or referential constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),
    /// A record expected to exist inside the unit of work is gone.
    #[error("Missing record: {0}")]
    Missing(String),
    /// Any other backend failure.
    #[error("Store failure: {0}")]
    Backend(String),
}

/// Errors raised by flow engine operations.
///
/// Every error aborts the active unit of work. Informational repeats are
/// not errors; they come back as a regular outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// The referenced worker, basket or gift does not exist.
    #[error("{resource} not found: {key}")]
    NotFound {
        /// The kind of record.
        resource: &'static str,
        /// The key that was looked up.
        key: String,
    },
    /// The transition is not allowed from the current state.
    #[error(transparent)]
    PreconditionViolation(#[from] DomainError),
    /// The worker record holds a state the transition tables do not cover.
    #[error("Unrecognized state: {0}")]
    UnrecognizedState(String),
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for FlowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnrecognizedState { .. } => {
                error!(error = %err, "Worker record holds an unrecognized state");
                Self::UnrecognizedState(err.to_string())
            }
            other => Self::Store(other),
        }
    }
}
