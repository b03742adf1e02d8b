use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_auth::{Actor, authorize_order_access};
use storefront_core::{AggregateId, AggregateRoot, DomainError, DomainResult, Money, UserId};
use storefront_events::Event;

use crate::discount::DiscountPolicy;

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub AggregateId);

impl OrderId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Product identifier carried on order items.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order status lifecycle.
///
/// Placement owns the only transition in this crate (`Draft -> Placed`);
/// `Shipped` and `Delivered` exist in the model but are driven by
/// fulfillment flows elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Placed,
    Shipped,
    Delivered,
}

/// Order line: product, unit price, quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    product_id: ProductId,
    price: Money,
    quantity: u32,
}

impl OrderItem {
    /// Build an item. The quantity must be positive.
    pub fn new(product_id: ProductId, price: Money, quantity: u32) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self {
            product_id,
            price,
            quantity,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> DomainResult<Money> {
        self.price.multiply(self.quantity)
    }
}

/// Aggregate root: customer order.
///
/// Created as a draft, mutated only while in draft, and placed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    customer_id: UserId,
    status: OrderStatus,
    vip_customer: bool,
    total_value: Option<Money>,
    items: Vec<OrderItem>,
    version: u64,
}

impl Order {
    /// Create a new draft order with no items.
    pub fn draft(id: OrderId, customer_id: UserId, vip_customer: bool) -> Self {
        Self {
            id,
            customer_id,
            status: OrderStatus::Draft,
            vip_customer,
            total_value: None,
            items: Vec::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> UserId {
        self.customer_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_vip_customer(&self) -> bool {
        self.vip_customer
    }

    /// The fixed order total; `None` until the order is placed.
    pub fn total_value(&self) -> Option<Money> {
        self.total_value
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn is_modifiable(&self) -> bool {
        matches!(self.status, OrderStatus::Draft)
    }

    /// Append an item to the order. Only draft orders are modifiable.
    pub fn add_item(&mut self, item: OrderItem) -> DomainResult<()> {
        if !self.is_modifiable() {
            return Err(DomainError::invalid_state(
                "cannot modify order once it has been placed",
            ));
        }

        self.items.push(item);
        self.version += 1;
        Ok(())
    }

    fn ensure_placeable(&self, actor: &Actor) -> DomainResult<()> {
        if self.status != OrderStatus::Draft {
            return Err(DomainError::invalid_state("order must be in draft status"));
        }

        if self.items.is_empty() {
            return Err(DomainError::invalid_state(
                "order must have at least one item",
            ));
        }

        authorize_order_access(actor, self.customer_id)
    }

    /// Total of all line items, VIP discount applied.
    ///
    /// Accumulated left to right from zero. The discount is taken once from
    /// the pre-discount total; it never compounds.
    pub fn compute_total(&self, policy: &DiscountPolicy) -> DomainResult<Money> {
        let mut total = Money::zero();
        for item in &self.items {
            total = total.add(item.line_total()?);
        }

        if self.vip_customer {
            let discount = total.multiply(policy.vip_rate())?;
            total = total.subtract(discount)?;
        }

        Ok(total)
    }

    /// Transition `Draft -> Placed`, fixing the order total.
    ///
    /// Preconditions, first failure wins: the order is a draft, it has at
    /// least one item, and `actor` either owns the order or is an
    /// administrator. No state is mutated unless every check and the total
    /// computation succeed.
    pub fn place(&mut self, actor: &Actor, policy: &DiscountPolicy) -> DomainResult<Money> {
        self.ensure_placeable(actor)?;
        let total = self.compute_total(policy)?;

        self.total_value = Some(total);
        self.status = OrderStatus::Placed;
        self.version += 1;

        Ok(total)
    }
}

impl AggregateRoot for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Event: OrderPlaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    OrderPlaced(OrderPlaced),
}

impl Event for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderPlaced(_) => "orders.order.placed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::OrderPlaced(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn test_customer_id() -> UserId {
        UserId::new()
    }

    fn test_order_id() -> OrderId {
        OrderId::new(AggregateId::new())
    }

    fn test_product_id() -> ProductId {
        ProductId::new(AggregateId::new())
    }

    fn money(text: &str) -> Money {
        Money::parse(text).unwrap()
    }

    fn item(price: &str, quantity: u32) -> OrderItem {
        OrderItem::new(test_product_id(), money(price), quantity).unwrap()
    }

    fn draft_with_items(customer_id: UserId, vip_customer: bool) -> Order {
        let mut order = Order::draft(test_order_id(), customer_id, vip_customer);
        order.add_item(item("10.00", 2)).unwrap();
        order.add_item(item("5.00", 1)).unwrap();
        order
    }

    #[test]
    fn draft_orders_start_unpriced_and_modifiable() {
        let order = Order::draft(test_order_id(), test_customer_id(), false);

        assert_eq!(order.status(), OrderStatus::Draft);
        assert_eq!(order.total_value(), None);
        assert!(order.is_modifiable());
        assert!(order.items().is_empty());
    }

    #[test]
    fn items_with_zero_quantity_are_rejected() {
        let err = OrderItem::new(test_product_id(), money("1.00"), 0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn placing_computes_the_item_total() {
        let customer_id = test_customer_id();
        let mut order = draft_with_items(customer_id, false);
        let actor = Actor::customer(customer_id);

        let total = order.place(&actor, &DiscountPolicy::standard()).unwrap();

        assert_eq!(total, money("25.00"));
        assert_eq!(order.status(), OrderStatus::Placed);
        assert_eq!(order.total_value(), Some(money("25.00")));
    }

    #[test]
    fn vip_customers_get_the_flat_discount_once() {
        let customer_id = test_customer_id();
        let mut order = draft_with_items(customer_id, true);
        let actor = Actor::customer(customer_id);

        // Pre-discount 25.00, discount 2.50, final 22.50.
        let total = order.place(&actor, &DiscountPolicy::standard()).unwrap();

        assert_eq!(total, money("22.50"));
        assert_eq!(order.total_value(), Some(money("22.50")));
    }

    #[test]
    fn compute_total_does_not_mutate_state() {
        let customer_id = test_customer_id();
        let order = draft_with_items(customer_id, true);

        let first = order.compute_total(&DiscountPolicy::standard()).unwrap();
        let second = order.compute_total(&DiscountPolicy::standard()).unwrap();

        assert_eq!(first, second);
        assert_eq!(order.status(), OrderStatus::Draft);
        assert_eq!(order.total_value(), None);
    }

    #[test]
    fn placing_a_placed_order_fails_with_invalid_state() {
        let customer_id = test_customer_id();
        let mut order = draft_with_items(customer_id, false);
        let actor = Actor::customer(customer_id);
        let first_total = order.place(&actor, &DiscountPolicy::standard()).unwrap();

        let err = order.place(&actor, &DiscountPolicy::standard()).unwrap_err();

        match err {
            DomainError::InvalidState(msg) if msg.contains("draft") => {}
            other => panic!("expected InvalidState about draft status, got {other:?}"),
        }
        assert_eq!(order.total_value(), Some(first_total));
    }

    #[test]
    fn placing_an_empty_draft_fails_with_invalid_state() {
        let customer_id = test_customer_id();
        let mut order = Order::draft(test_order_id(), customer_id, false);
        let actor = Actor::customer(customer_id);

        let err = order.place(&actor, &DiscountPolicy::standard()).unwrap_err();

        match err {
            DomainError::InvalidState(msg) if msg.contains("at least one item") => {}
            other => panic!("expected InvalidState about items, got {other:?}"),
        }
        assert_eq!(order.status(), OrderStatus::Draft);
    }

    #[test]
    fn strangers_cannot_place_the_order() {
        let mut order = draft_with_items(test_customer_id(), false);
        let stranger = Actor::customer(test_customer_id());

        let err = order.place(&stranger, &DiscountPolicy::standard()).unwrap_err();

        assert_eq!(err, DomainError::Unauthorized);
        assert_eq!(order.status(), OrderStatus::Draft);
        assert_eq!(order.total_value(), None);
    }

    #[test]
    fn administrators_can_place_any_order() {
        let mut order = draft_with_items(test_customer_id(), false);
        let admin = Actor::administrator(test_customer_id());

        let total = order.place(&admin, &DiscountPolicy::standard()).unwrap();

        assert_eq!(total, money("25.00"));
        assert_eq!(order.status(), OrderStatus::Placed);
    }

    #[test]
    fn placed_orders_are_no_longer_modifiable() {
        let customer_id = test_customer_id();
        let mut order = draft_with_items(customer_id, false);
        let actor = Actor::customer(customer_id);
        order.place(&actor, &DiscountPolicy::standard()).unwrap();

        let err = order.add_item(item("1.00", 1)).unwrap_err();

        assert!(matches!(err, DomainError::InvalidState(_)));
        assert_eq!(order.items().len(), 2);
    }

    #[test]
    fn version_increments_per_state_change() {
        let customer_id = test_customer_id();
        let mut order = Order::draft(test_order_id(), customer_id, false);
        assert_eq!(order.version(), 0);

        order.add_item(item("10.00", 2)).unwrap();
        assert_eq!(order.version(), 1);

        let actor = Actor::customer(customer_id);
        order.place(&actor, &DiscountPolicy::standard()).unwrap();
        assert_eq!(order.version(), 2);
    }

    #[test]
    fn failed_placement_does_not_bump_the_version() {
        let customer_id = test_customer_id();
        let mut order = Order::draft(test_order_id(), customer_id, false);
        let actor = Actor::customer(customer_id);

        assert!(order.place(&actor, &DiscountPolicy::standard()).is_err());
        assert_eq!(order.version(), 0);
    }

    #[test]
    fn a_custom_discount_rate_flows_through_placement() {
        let customer_id = test_customer_id();
        let mut order = draft_with_items(customer_id, true);
        let actor = Actor::customer(customer_id);
        let policy = DiscountPolicy::with_vip_rate(Decimal::new(50, 2)).unwrap();

        let total = order.place(&actor, &policy).unwrap();

        assert_eq!(total, money("12.50"));
    }

    #[test]
    fn order_placed_event_reports_type_and_time() {
        let occurred_at = Utc::now();
        let event = OrderEvent::OrderPlaced(OrderPlaced {
            order_id: test_order_id(),
            occurred_at,
        });

        assert_eq!(event.event_type(), "orders.order.placed");
        assert_eq!(event.version(), 1);
        assert_eq!(event.occurred_at(), occurred_at);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: the total is independent of item order (the sum is
        /// commutative).
        #[test]
        fn total_is_independent_of_item_order(
            lines in prop::collection::vec((1i64..1_000_000, 1u32..100), 1..10),
        ) {
            let customer_id = test_customer_id();
            let actor = Actor::customer(customer_id);

            let mut forward = Order::draft(test_order_id(), customer_id, false);
            for (cents, quantity) in &lines {
                let price = Money::from_decimal(Decimal::new(*cents, 2)).unwrap();
                forward
                    .add_item(OrderItem::new(test_product_id(), price, *quantity).unwrap())
                    .unwrap();
            }

            let mut reversed = Order::draft(test_order_id(), customer_id, false);
            for (cents, quantity) in lines.iter().rev() {
                let price = Money::from_decimal(Decimal::new(*cents, 2)).unwrap();
                reversed
                    .add_item(OrderItem::new(test_product_id(), price, *quantity).unwrap())
                    .unwrap();
            }

            let policy = DiscountPolicy::standard();
            let a = forward.place(&actor, &policy).unwrap();
            let b = reversed.place(&actor, &policy).unwrap();

            prop_assert_eq!(a, b);
        }
    }
}
