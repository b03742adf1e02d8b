use std::collections::HashMap;
use std::sync::RwLock;

use storefront_core::{AggregateRoot, ExpectedVersion};
use storefront_orders::{Order, OrderId};

use super::r#trait::{OrderRepository, RepositoryError};

/// In-memory order store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn find_by_id(&self, order_id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))?;

        Ok(orders.get(&order_id).cloned())
    }

    fn save(&self, order: &Order, expected: ExpectedVersion) -> Result<u64, RepositoryError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))?;

        // Check-and-insert under one write lock; racing writers serialize here.
        let current = orders
            .get(&order.id_typed())
            .map(|stored| stored.version())
            .unwrap_or(0);

        if !expected.matches(current) {
            return Err(RepositoryError::Conflict(format!(
                "expected {expected:?}, found {current}"
            )));
        }

        orders.insert(order.id_typed(), order.clone());
        Ok(order.version())
    }
}
