//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by their attribute values**;
/// two instances with the same values are the same value. To "modify" one,
/// build a new instance. This keeps them safe to copy around and share.
///
/// Contrast with aggregates, which have identity: two orders with identical
/// contents are still different orders, but two amounts of `10.00` are the
/// same amount.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
