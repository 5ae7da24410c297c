//! Derived order pricing.
//!
//! A [`PricingBreakdown`] is a pure function of a cart snapshot - dependent
//! views re-derive it after every cart mutation rather than caching it.
//! Amounts stay unrounded internally; rounding to two decimals happens only
//! in [`PricingBreakdown::rounded`], at display or submission time.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// Orders with a subtotal strictly above this ship free.
pub const FREE_DELIVERY_THRESHOLD: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Flat delivery fee below the free-delivery threshold.
pub const FLAT_DELIVERY_FEE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Tax rate applied to the subtotal (5%).
pub const TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// The derived subtotal / delivery fee / tax / total for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    /// Sum of quantity x unit price over all lines.
    pub subtotal: Decimal,
    /// Zero above the free-delivery threshold, else the flat fee.
    pub delivery_fee: Decimal,
    /// 5% of the subtotal.
    pub tax: Decimal,
    /// Subtotal + delivery fee + tax.
    pub total: Decimal,
}

impl PricingBreakdown {
    /// Compute the breakdown for a cart snapshot.
    ///
    /// Summation is commutative, so the result is independent of line
    /// order. An empty cart yields subtotal 0 and still attracts the flat
    /// fee at this level; checkout blocks empty carts before a breakdown
    /// is ever shown.
    #[must_use]
    pub fn compute(cart: &Cart) -> Self {
        let subtotal: Decimal = cart
            .lines()
            .map(|line| line.product.price.times(line.qty))
            .sum();
        Self::from_subtotal(subtotal)
    }

    /// Compute the breakdown from a raw subtotal.
    ///
    /// The boundary is strict: a subtotal of exactly 500 still pays the
    /// flat fee; only subtotals greater than 500 ship free.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let delivery_fee = if subtotal > FREE_DELIVERY_THRESHOLD {
            Decimal::ZERO
        } else {
            FLAT_DELIVERY_FEE
        };
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            delivery_fee,
            tax,
            total: subtotal + delivery_fee + tax,
        }
    }

    /// Whether this order qualifies for free delivery.
    #[must_use]
    pub fn is_delivery_free(&self) -> bool {
        self.delivery_fee.is_zero()
    }

    /// A copy with every amount rounded to two decimals, for display or
    /// submission. Midpoints round away from zero, matching how the web
    /// client's `toFixed` presented the same numbers.
    #[must_use]
    pub fn rounded(&self) -> Self {
        let round = |d: Decimal| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self {
            subtotal: round(self.subtotal),
            delivery_fee: round(self.delivery_fee),
            tax: round(self.tax),
            total: round(self.total),
        }
    }
}
