//! `storefront-infra` — collaborator seams and the placement pipeline.
//!
//! Composes the pure order domain with persistence, notification and event
//! publication. Every seam is a trait with an in-memory implementation for
//! tests/dev; real backends plug in without touching domain code.

pub mod notifications;
pub mod placement;
pub mod repository;


pub use notifications::{InMemoryNotificationSink, NotificationSink};
pub use placement::{
    ConfirmationEmail, PlaceOrderError, PlacementEngine, PlacementHook, PublishOrderPlaced,
};
pub use repository::{InMemoryOrderRepository, OrderRepository, RepositoryError};
