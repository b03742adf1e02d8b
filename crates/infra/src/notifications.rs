//! Customer notification seam.

use std::sync::{Arc, Mutex};

use storefront_orders::{Order, OrderId};

/// Outbound customer-notification channel (confirmation email and the like).
///
/// Fire-and-forget from the placement pipeline's perspective: delivery
/// failures are logged by the caller, never surfaced to the placing user.
pub trait NotificationSink: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn send_order_confirmation(&self, order: &Order) -> Result<(), Self::Error>;
}

impl<S> NotificationSink for Arc<S>
where
    S: NotificationSink + ?Sized,
{
    type Error = S::Error;

    fn send_order_confirmation(&self, order: &Order) -> Result<(), Self::Error> {
        (**self).send_order_confirmation(order)
    }
}

#[derive(Debug)]
pub enum InMemorySinkError {
    /// Delivery failed due to internal lock poisoning.
    Poisoned,
}

/// Notification sink that records confirmations, for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryNotificationSink {
    sent: Mutex<Vec<OrderId>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Order ids confirmations were sent for, in send order.
    pub fn sent(&self) -> Vec<OrderId> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

impl NotificationSink for InMemoryNotificationSink {
    type Error = InMemorySinkError;

    fn send_order_confirmation(&self, order: &Order) -> Result<(), Self::Error> {
        let mut sent = self.sent.lock().map_err(|_| InMemorySinkError::Poisoned)?;
        sent.push(order.id_typed());
        Ok(())
    }
}
