//! Actor identity and authorization.
//!
//! Deterministic identity/authorization primitives: who is acting, and
//! whether they may act on a given order. Token validation, sessions and
//! credential storage live outside this workspace; by the time the domain
//! sees an [`Actor`], identity is already resolved.

pub mod actor;
pub mod identity;
pub mod roles;

pub use actor::{Actor, authorize_order_access};
pub use identity::{FixedIdentity, IdentityResolver};
pub use roles::Role;
