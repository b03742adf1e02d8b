//! Order persistence seam.
//!
//! The repository is the durability boundary of placement: an order is
//! placed once `save` returns, and not before. Real backends must serialize
//! concurrent writers per order; the contract here is optimistic — an
//! expected version captured at load, checked at save.

mod in_memory;
mod r#trait;

pub use in_memory::InMemoryOrderRepository;
pub use r#trait::{OrderRepository, RepositoryError};
