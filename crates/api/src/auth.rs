// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Credentials are handled upstream. By the time a request reaches this
//! layer it carries an opaque actor id, which is resolved here to an active
//! staff member and checked against the role table.

use pedregal_audit::Actor;
use pedregal_domain::{StaffRole, StaffUser};
use pedregal_persistence::Persistence;
use tracing::{debug, warn};

use crate::error::AuthError;

/// A staff member resolved from an actor id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The opaque actor id recorded on log entries.
    pub id: String,
    pub role: StaffRole,
    pub display_name: String,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    /// * `display_name` - The actor's full name
    #[must_use]
    pub const fn new(id: String, role: StaffRole, display_name: String) -> Self {
        Self {
            id,
            role,
            display_name,
        }
    }

    #[must_use]
    pub fn from_staff_user(user: &StaffUser) -> Self {
        Self::new(user.id.clone(), user.role, user.display_name())
    }

    /// Converts this actor into the audit actor attached to log entries.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role.as_str().to_string())
    }
}

/// Every operation the API gates by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LookupWorker,
    RegisterAtWindow,
    EnterBasketHall,
    EnterGiftHall,
    ValidateBasketCode,
    DeliverBasket,
    ValidateGiftCode,
    DeliverGifts,
    ViewWorkerFlow,
    ReadLogs,
    ViewCounters,
    RecordObservation,
    ManageWorkers,
    ManageInventory,
    ManageStaff,
    PurgeLogs,
}

const ALL_ROLES: &[StaffRole] = &[
    StaffRole::WindowAssistant,
    StaffRole::BasketSecurity,
    StaffRole::GiftSecurity,
    StaffRole::BasketDeliveryClerk,
    StaffRole::GiftDeliveryClerk,
    StaffRole::ProcessLead,
    StaffRole::Admin,
];
const SUPERVISORS: &[StaffRole] = &[StaffRole::Admin, StaffRole::ProcessLead];
const ADMINS: &[StaffRole] = &[StaffRole::Admin];

impl Operation {
    /// The name reported in authorization failures.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LookupWorker => "lookup_worker",
            Self::RegisterAtWindow => "register_at_window",
            Self::EnterBasketHall => "enter_basket_hall",
            Self::EnterGiftHall => "enter_gift_hall",
            Self::ValidateBasketCode => "validate_basket_code",
            Self::DeliverBasket => "deliver_basket",
            Self::ValidateGiftCode => "validate_gift_code",
            Self::DeliverGifts => "deliver_gifts",
            Self::ViewWorkerFlow => "view_worker_flow",
            Self::ReadLogs => "read_logs",
            Self::ViewCounters => "view_counters",
            Self::RecordObservation => "record_observation",
            Self::ManageWorkers => "manage_workers",
            Self::ManageInventory => "manage_inventory",
            Self::ManageStaff => "manage_staff",
            Self::PurgeLogs => "purge_logs",
        }
    }

    /// The roles allowed to perform this operation.
    ///
    /// Each checkpoint accepts exactly one role. Admins do not inherit
    /// checkpoint roles.
    #[must_use]
    pub const fn allowed_roles(self) -> &'static [StaffRole] {
        match self {
            Self::LookupWorker => ALL_ROLES,
            Self::RegisterAtWindow => &[StaffRole::WindowAssistant],
            Self::EnterBasketHall => &[StaffRole::BasketSecurity],
            Self::EnterGiftHall => &[StaffRole::GiftSecurity],
            Self::ValidateBasketCode | Self::DeliverBasket => &[StaffRole::BasketDeliveryClerk],
            Self::ValidateGiftCode | Self::DeliverGifts => &[StaffRole::GiftDeliveryClerk],
            Self::ViewWorkerFlow
            | Self::ReadLogs
            | Self::ViewCounters
            | Self::RecordObservation => SUPERVISORS,
            Self::ManageWorkers | Self::ManageInventory | Self::ManageStaff | Self::PurgeLogs => {
                ADMINS
            }
        }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks whether an actor may perform an operation.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor's role is not in the
    /// operation's allowed roles.
    pub fn authorize(actor: &AuthenticatedActor, operation: Operation) -> Result<(), AuthError> {
        let allowed: &[StaffRole] = operation.allowed_roles();
        if allowed.contains(&actor.role) {
            return Ok(());
        }

        let required_role: String = allowed
            .iter()
            .map(StaffRole::as_str)
            .collect::<Vec<&str>>()
            .join(" or ");
        warn!(
            actor_id = %actor.id,
            role = %actor.role,
            action = operation.name(),
            "Authorization denied"
        );
        Err(AuthError::Unauthorized {
            action: operation.name().to_string(),
            required_role,
        })
    }
}

/// Resolves actor ids to staff members.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Resolves an actor id to an active staff member.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the id is empty, unknown,
    /// belongs to an inactive staff member, or cannot be looked up.
    pub fn authenticate(
        persistence: &mut Persistence,
        actor_id: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        let actor_id: &str = actor_id.trim();
        if actor_id.is_empty() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Actor ID cannot be empty"),
            });
        }

        let user: StaffUser = persistence
            .get_staff_user(actor_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: format!("Unknown actor '{actor_id}'"),
            })?;

        if !user.is_active {
            return Err(AuthError::AuthenticationFailed {
                reason: format!("Actor '{actor_id}' is inactive"),
            });
        }

        debug!(actor_id = %user.id, role = %user.role, "Actor resolved");
        Ok(AuthenticatedActor::from_staff_user(&user))
    }
}
