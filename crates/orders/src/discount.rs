//! Discount configuration applied at placement time.

use rust_decimal::Decimal;

use storefront_core::{DomainError, DomainResult};

/// Placement-time discount rates, injected into the placement pipeline.
///
/// Rates are configuration, not literals inside placement logic: changing
/// the VIP rate (or introducing tiered/campaign rates) must not touch the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountPolicy {
    vip_rate: Decimal,
}

impl DiscountPolicy {
    /// Policy with the standard 10% VIP rate.
    pub fn standard() -> Self {
        Self {
            vip_rate: Decimal::new(10, 2),
        }
    }

    /// Policy with a custom VIP rate in `[0, 1]`.
    pub fn with_vip_rate(vip_rate: Decimal) -> DomainResult<Self> {
        if vip_rate < Decimal::ZERO || vip_rate > Decimal::ONE {
            return Err(DomainError::validation(format!(
                "vip rate must be within [0, 1], got {vip_rate}"
            )));
        }
        Ok(Self { vip_rate })
    }

    pub fn vip_rate(&self) -> Decimal {
        self.vip_rate
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
