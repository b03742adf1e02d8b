use std::sync::Arc;

use thiserror::Error;

use storefront_core::ExpectedVersion;
use storefront_orders::{Order, OrderId};

/// Persistence failure surfaced by a repository.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store rejected or lost the operation.
    #[error("storage failure: {0}")]
    Storage(String),

    /// Optimistic concurrency check failed (stale order version).
    #[error("concurrency conflict: {0}")]
    Conflict(String),
}

/// Order persistence.
///
/// `save` compares `expected` — the version captured when the order was
/// loaded — against the stored version, so a lost-update race surfaces as
/// [`RepositoryError::Conflict`] instead of a double placement.
pub trait OrderRepository: Send + Sync {
    /// Load an order by id. `None` when no order exists under the id.
    fn find_by_id(&self, order_id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// Persist the order, returning the committed version.
    fn save(&self, order: &Order, expected: ExpectedVersion) -> Result<u64, RepositoryError>;
}

impl<R> OrderRepository for Arc<R>
where
    R: OrderRepository + ?Sized,
{
    fn find_by_id(&self, order_id: OrderId) -> Result<Option<Order>, RepositoryError> {
        (**self).find_by_id(order_id)
    }

    fn save(&self, order: &Order, expected: ExpectedVersion) -> Result<u64, RepositoryError> {
        (**self).save(order, expected)
    }
}
