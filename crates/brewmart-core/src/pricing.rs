//! Display pricing: base price plus the market fee.
//!
//! The all-in price shown on every card is `price + price * fee_rate`.
//! The fee rate defaults to 50%; it is configurable through
//! `BREWMART_MARKET_FEE_RATE` but otherwise applied uniformly.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Default market fee rate (0.5, i.e. 50%).
pub const DEFAULT_MARKET_FEE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Decimal places used for displayed amounts.
const DISPLAY_SCALE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub base: Decimal,
    pub fee: Decimal,
    pub total: Decimal,
}

impl PriceBreakdown {
    /// Computes the breakdown with exact decimal arithmetic, rounding each
    /// displayed amount to cents.
    #[must_use]
    pub fn compute(base: Decimal, fee_rate: Decimal) -> Self {
        let fee = base * fee_rate;
        let total = base + fee;
        Self {
            base: round_display(base),
            fee: round_display(fee),
            total: round_display(total),
        }
    }

    /// Formats the total with exactly two decimals, e.g. `"15.00"`.
    #[must_use]
    pub fn display_total(&self) -> String {
        format_amount(self.total)
    }
}

/// Formats an amount with exactly two decimal places.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_display(amount);
    rounded.rescale(DISPLAY_SCALE);
    rounded.to_string()
}

/// Half-up rounding to cents; banker's rounding would show 19.485 as 19.48.
fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
