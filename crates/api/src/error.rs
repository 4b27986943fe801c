// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use pedregal::{FlowError, StoreError};
use pedregal_domain::DomainError;
use pedregal_persistence::PersistenceError;
use thiserror::Error;
use tracing::error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The actor could not be resolved to an active staff member.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The actor's role does not permit the operation.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The roles allowed to perform it.
        required_role: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain and engine errors and represent the API
/// contract. Each variant maps to one HTTP status at the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The roles allowed to perform it.
        required_role: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The worker is not in a state that allows the operation.
    #[error("{message}")]
    PreconditionViolation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A uniqueness rule was violated.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

fn invalid(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// Malformed input becomes `InvalidInput`; checkpoint rejections become
/// `PreconditionViolation`.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidNationalId { .. } => invalid("national_id", &err),
        DomainError::InvalidIdentifier { kind, .. } => invalid(&format!("{kind}_id"), &err),
        DomainError::InvalidItemCode(_) => invalid("code", &err),
        DomainError::InvalidName(_) => invalid("name", &err),
        DomainError::InvalidObservation(_) => invalid("observation", &err),
        DomainError::InvalidDate { .. } => invalid("date", &err),
        DomainError::EmptyGiftList => invalid("gift_ids", &err),
        DomainError::UnknownBasketStatus(_) | DomainError::UnknownGiftStatus(_) => {
            invalid("status", &err)
        }
        DomainError::UnknownHall(_) => invalid("hall", &err),
        DomainError::UnknownStaffRole(_) => invalid("role", &err),
        DomainError::WindowNotPassed { .. }
        | DomainError::HallNotEntered { .. }
        | DomainError::NotEligibleForGifts { .. }
        | DomainError::InconsistentGiftState { .. }
        | DomainError::GiftsNotFound { .. }
        | DomainError::BasketAlreadyAssigned { .. } => ApiError::PreconditionViolation {
            message: err.to_string(),
        },
    }
}

/// Translates a flow engine error into an API error.
///
/// A worker stuck in an unrecognized state is a bad request: the unit has
/// already rolled back and nothing was written.
#[must_use]
pub fn translate_flow_error(err: FlowError) -> ApiError {
    match err {
        FlowError::NotFound { resource, key } => ApiError::ResourceNotFound {
            resource_type: capitalize(resource),
            message: format!("No {resource} matches '{key}'"),
        },
        FlowError::PreconditionViolation(domain_err) => translate_domain_error(domain_err),
        FlowError::UnrecognizedState(msg) => {
            error!(state = %msg, "Rejecting transition on unrecognized worker state");
            ApiError::PreconditionViolation {
                message: format!("Unrecognized state: {msg}"),
            }
        }
        FlowError::Store(StoreError::Conflict(msg)) => ApiError::Conflict { message: msg },
        FlowError::Store(other) => {
            error!(error = %other, "Flow store failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        PersistenceError::Conflict(msg) => ApiError::Conflict { message: msg },
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
