//! Exact, non-negative monetary value.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Immutable monetary amount backed by an exact decimal.
///
/// Invariant: the amount is never negative. Every constructor and every
/// operation that could break the invariant is fallible and returns
/// `DomainError::InvalidAmount` instead of producing a negative value.
///
/// Arithmetic is exact: no binary floating point anywhere, and the scale of
/// the inputs is preserved (`10.00` stays `10.00`, it does not collapse to
/// `10`). Equality and ordering compare the numeric value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Money(Decimal);

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl Money {
    /// The additive identity (amount 0).
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Parse a culture-invariant decimal numeral (e.g. `"19.99"`).
    ///
    /// Grouping separators, currency symbols and scientific notation are
    /// rejected as `InvalidFormat`; negative numerals as `InvalidAmount`.
    pub fn parse(text: &str) -> DomainResult<Self> {
        let amount = Decimal::from_str(text).map_err(|_| {
            DomainError::invalid_format(format!("not a decimal numeral: '{text}'"))
        })?;
        Self::from_decimal(amount)
    }

    /// Wrap an exact decimal amount.
    pub fn from_decimal(amount: Decimal) -> DomainResult<Self> {
        if amount < Decimal::ZERO {
            return Err(DomainError::invalid_amount(format!(
                "amount must not be negative, got {amount}"
            )));
        }
        Ok(Self(amount))
    }

    /// The exact decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Sum of two amounts.
    ///
    /// Infallible: the sum of two non-negative amounts is non-negative.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }

    /// Difference of two amounts.
    pub fn subtract(self, other: Self) -> DomainResult<Self> {
        let difference = self.0 - other.0;
        if difference < Decimal::ZERO {
            return Err(DomainError::invalid_amount(format!(
                "subtracting {} from {} would go negative",
                other.0, self.0
            )));
        }
        Ok(Self(difference))
    }

    /// Scale an amount by an integer or decimal factor.
    ///
    /// The factor itself is unconstrained; what is enforced is the result:
    /// a negative product is rejected.
    pub fn multiply(self, factor: impl Into<Decimal>) -> DomainResult<Self> {
        let product = self.0 * factor.into();
        if product < Decimal::ZERO {
            return Err(DomainError::invalid_amount(format!(
                "product must not be negative, got {product}"
            )));
        }
        Ok(Self(product))
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
