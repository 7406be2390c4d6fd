//! Line total computation for the two discount models.
//!
//! ```text
//! base       = quantity * unit_price
//! discounted = base * (1 - discount/100)      (Percentage, Model A)
//! discounted = base - discount                (Absolute,   Model B)
//! line_total = round2(discounted * (1 + tax_rate_percent/100))
//! ```
//!
//! Only the final line total is rounded. A discount larger than the base is not
//! clamped and yields a negative line total.
//!
//! All arithmetic is checked; `None` means the result does not fit a `Decimal`.

use rust_decimal::Decimal;

use farmbooks_core::round_money;

use crate::config::DiscountModel;
use crate::item::LineItem;

impl DiscountModel {
    /// Discounted amount before tax, unrounded.
    pub fn discounted(self, item: &LineItem) -> Option<Decimal> {
        let base = item.quantity.checked_mul(item.unit_price)?;
        match self {
            DiscountModel::Percentage => {
                let share = item.discount.checked_div(Decimal::ONE_HUNDRED)?;
                let kept = Decimal::ONE.checked_sub(share)?;
                base.checked_mul(kept)
            }
            DiscountModel::Absolute => base.checked_sub(item.discount),
        }
    }

    /// Line total after tax, rounded to two places.
    pub fn line_total(self, item: &LineItem) -> Option<Decimal> {
        let discounted = self.discounted(item)?;
        let tax_factor =
            Decimal::ONE.checked_add(item.tax_rate_percent.checked_div(Decimal::ONE_HUNDRED)?)?;
        discounted.checked_mul(tax_factor).map(round_money)
    }

    /// Every line total in order.
    pub fn line_totals<'a, I>(self, items: I) -> Option<Vec<Decimal>>
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        items.into_iter().map(|item| self.line_total(item)).collect()
    }
}

/// Sum line totals, rounding once at the end.
pub fn grand_total<'a, I>(line_totals: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Decimal>,
{
    line_totals
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, total| acc.checked_add(*total))
        .map(round_money)
}
