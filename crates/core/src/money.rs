//! Currency rounding shared by every computed amount.
//!
//! Amounts are decimals in the document's currency (not integer minor units).
//! Only final results are rounded; intermediate products keep full precision.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on line totals and grand totals.
pub const MONEY_DP: u32 = 2;

/// Round to [`MONEY_DP`] places, half away from zero (`0.005` → `0.01`).
///
/// The result always carries a scale of exactly [`MONEY_DP`], so `18000`
/// comes back as `18000.00`.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(MONEY_DP);
    rounded
}

/// Render an amount with exactly two decimals, e.g. `262500.00`.
pub fn format_money(value: Decimal) -> String {
    round_money(value).to_string()
}
