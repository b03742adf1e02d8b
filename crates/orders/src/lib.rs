//! Order domain module.
//!
//! This crate contains business rules for customer orders, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod discount;
pub mod order;

pub use discount::DiscountPolicy;
pub use order::{Order, OrderEvent, OrderId, OrderItem, OrderPlaced, OrderStatus, ProductId};
