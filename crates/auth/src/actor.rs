use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, UserId};

use crate::roles::Role;

/// A fully resolved identity for authorization decisions.
///
/// Construction is intentionally decoupled from storage and transport:
/// callers derive the administrator flag from role membership (claims, a
/// policy source) before the domain ever sees the actor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    user_id: UserId,
    administrator: bool,
}

impl Actor {
    pub fn new(user_id: UserId, administrator: bool) -> Self {
        Self {
            user_id,
            administrator,
        }
    }

    /// A regular customer actor.
    pub fn customer(user_id: UserId) -> Self {
        Self::new(user_id, false)
    }

    /// An administrative actor (may act on any customer's order).
    pub fn administrator(user_id: UserId) -> Self {
        Self::new(user_id, true)
    }

    /// Derive the administrator flag from role membership.
    pub fn from_roles(user_id: UserId, roles: &[Role]) -> Self {
        Self::new(user_id, roles.iter().any(Role::is_administrative))
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn is_administrator(&self) -> bool {
        self.administrator
    }
}

/// Check whether `actor` may operate on an order owned by `owner`.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize_order_access(actor: &Actor, owner: UserId) -> DomainResult<()> {
    if actor.is_administrator() || actor.user_id() == owner {
        Ok(())
    } else {
        Err(DomainError::Unauthorized)
    }
}
