//! Order placement pipeline (application-level orchestration).
//!
//! Load → validate → compute → persist → notify. The pipeline composes the
//! repository, notification and event-bus seams; the decision logic itself
//! lives on the [`Order`] aggregate. Persistence is the durability boundary:
//! everything before it can fail without visible effect, everything after it
//! is best-effort.

use chrono::Utc;
use thiserror::Error;

use storefront_auth::Actor;
use storefront_core::{AggregateRoot, DomainError, ExpectedVersion};
use storefront_events::EventBus;
use storefront_orders::{DiscountPolicy, Order, OrderEvent, OrderId, OrderPlaced};

use crate::notifications::NotificationSink;
use crate::repository::{OrderRepository, RepositoryError};

/// Failure of a `place_order` call.
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// No order exists under the requested id.
    #[error("order not found")]
    NotFound,

    /// The order cannot be placed in its current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The actor neither owns the order nor is an administrator.
    #[error("unauthorized")]
    Unauthorized,

    /// Monetary computation rejected the order's figures.
    #[error("invalid amount: {0}")]
    Amount(String),

    /// Input validation failure (deterministic).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Persisting the placed order failed; the order is NOT placed.
    #[error("persistence failure: {0}")]
    Persistence(#[from] RepositoryError),
}

impl From<DomainError> for PlaceOrderError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::NotFound => PlaceOrderError::NotFound,
            DomainError::InvalidState(msg) => PlaceOrderError::InvalidState(msg),
            DomainError::Unauthorized => PlaceOrderError::Unauthorized,
            DomainError::InvalidAmount(msg) | DomainError::InvalidFormat(msg) => {
                PlaceOrderError::Amount(msg)
            }
            DomainError::Validation(msg) => PlaceOrderError::Validation(msg),
        }
    }
}

/// Post-commit side effect, run only once the placed order is durable.
///
/// Hook failures are best-effort by contract: the pipeline logs them and
/// completes the placement regardless. Anything that must not be lost
/// belongs before the save, not in a hook.
pub trait PlacementHook: Send + Sync {
    /// Stable hook name for logging.
    fn name(&self) -> &'static str;

    fn on_order_placed(&self, order: &Order) -> anyhow::Result<()>;
}

/// Hook: send the customer an order confirmation.
pub struct ConfirmationEmail<S> {
    sink: S,
}

impl<S> ConfirmationEmail<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S> PlacementHook for ConfirmationEmail<S>
where
    S: NotificationSink,
{
    fn name(&self) -> &'static str {
        "confirmation_email"
    }

    fn on_order_placed(&self, order: &Order) -> anyhow::Result<()> {
        self.sink
            .send_order_confirmation(order)
            .map_err(|e| anyhow::anyhow!("confirmation failed: {e:?}"))
    }
}

/// Hook: publish [`OrderPlaced`] on the event bus.
pub struct PublishOrderPlaced<B> {
    bus: B,
}

impl<B> PublishOrderPlaced<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

impl<B> PlacementHook for PublishOrderPlaced<B>
where
    B: EventBus<OrderEvent>,
{
    fn name(&self) -> &'static str {
        "publish_order_placed"
    }

    fn on_order_placed(&self, order: &Order) -> anyhow::Result<()> {
        let event = OrderEvent::OrderPlaced(OrderPlaced {
            order_id: order.id_typed(),
            occurred_at: Utc::now(),
        });

        self.bus
            .publish(event)
            .map_err(|e| anyhow::anyhow!("publish failed: {e:?}"))
    }
}

/// Order placement engine.
///
/// Stateless per invocation and reentrant across orders; all mutable state
/// lives in the order loaded for the call. Serializing concurrent placements
/// of one order is the repository's job (expected-version check at save).
pub struct PlacementEngine<R> {
    repository: R,
    policy: DiscountPolicy,
    hooks: Vec<Box<dyn PlacementHook>>,
}

impl<R> PlacementEngine<R> {
    pub fn new(repository: R, policy: DiscountPolicy) -> Self {
        Self {
            repository,
            policy,
            hooks: Vec::new(),
        }
    }

    /// Register a post-commit hook. Hooks run in registration order.
    #[must_use]
    pub fn with_hook(mut self, hook: Box<dyn PlacementHook>) -> Self {
        self.hooks.push(hook);
        self
    }
}

impl<R> PlacementEngine<R>
where
    R: OrderRepository,
{
    /// Place the draft order identified by `order_id` on behalf of `actor`.
    ///
    /// Preconditions, first failure wins: the order exists, it is a draft,
    /// it has at least one item, and the actor owns it or is an
    /// administrator. On success the order total is fixed, the status is
    /// `Placed`, and the order is durable before any hook runs. On a save
    /// failure the call fails and no hook runs; on a hook failure the
    /// placement stands and the failure is only logged.
    pub fn place_order(&self, order_id: OrderId, actor: &Actor) -> Result<Order, PlaceOrderError> {
        // 1) Load, capturing the version the concurrency check will expect.
        let mut order = self
            .repository
            .find_by_id(order_id)?
            .ok_or(PlaceOrderError::NotFound)?;
        let expected = ExpectedVersion::Exact(order.version());

        // 2) Validate, price and transition (pure domain).
        let total = order.place(actor, &self.policy)?;

        // 3) Persist — the durability boundary.
        let version = self.repository.save(&order, expected)?;

        tracing::info!(
            order_id = %order_id,
            total = %total,
            version,
            "order placed"
        );

        // 4) Post-commit hooks, best-effort.
        for hook in &self.hooks {
            if let Err(error) = hook.on_order_placed(&order) {
                tracing::warn!(
                    hook = hook.name(),
                    order_id = %order_id,
                    error = %error,
                    "post-placement hook failed"
                );
            }
        }

        Ok(order)
    }
}
