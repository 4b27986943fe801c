// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor extraction for the server.
//!
//! Credentials are verified upstream of this process. Every request carries
//! the acting staff member's id in the `X-Actor-Id` header, which is resolved
//! here to an active staff member before any handler runs.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use pedregal_api::{AuthenticatedActor, AuthenticationService};
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse, HttpError};

/// The header carrying the acting staff member's id.
pub const ACTOR_HEADER: &str = "X-Actor-Id";

/// Extractor for the acting staff member.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     ActorHeader(actor): ActorHeader,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing, is not valid ASCII, or
/// does not name an active staff member, and with HTTP 500 if the staff
/// table cannot be read.
pub struct ActorHeader(pub AuthenticatedActor);

impl FromRequestParts<AppState> for ActorHeader {
    type Rejection = ActorError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor_id: String = parts
            .headers
            .get(ACTOR_HEADER)
            .ok_or_else(|| {
                debug!("Missing actor header");
                ActorError::MissingHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid actor header encoding");
                ActorError::InvalidHeader
            })?
            .to_owned();

        let actor: AuthenticatedActor = state
            .run(move |persistence| {
                Ok(AuthenticationService::authenticate(persistence, &actor_id))
            })
            .await
            .map_err(ActorError::Unavailable)?
            .map_err(|e| {
                warn!(error = %e, "Actor resolution failed");
                ActorError::Unresolved(e.to_string())
            })?;

        Ok(Self(actor))
    }
}

/// Actor extraction errors.
#[derive(Debug)]
pub enum ActorError {
    MissingHeader,
    InvalidHeader,
    /// The id did not resolve to an active staff member.
    Unresolved(String),
    /// The staff lookup itself failed.
    Unavailable(HttpError),
}

impl IntoResponse for ActorError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingHeader => format!("Missing {ACTOR_HEADER} header"),
            Self::InvalidHeader => format!("Invalid {ACTOR_HEADER} header encoding"),
            Self::Unresolved(reason) => reason,
            Self::Unavailable(err) => return err.into_response(),
        };

        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message,
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
