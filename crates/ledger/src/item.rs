//! Line items and the fields a form can edit.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use farmbooks_core::DomainError;

/// One row of a financial document.
///
/// The line total is never stored here; it is derived from these fields by the
/// ledger's [`DiscountModel`](crate::DiscountModel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Absolute amount under Model B, percentage (0–100) under Model A.
    pub discount: Decimal,
    pub tax_rate_percent: Decimal,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            description: String::new(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            discount: Decimal::ZERO,
            tax_rate_percent: Decimal::ZERO,
        }
    }
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        discount: Decimal,
        tax_rate_percent: Decimal,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            discount,
            tax_rate_percent,
        }
    }

    /// Current value of a numeric field (`None` for the description).
    pub fn numeric(&self, field: ItemField) -> Option<Decimal> {
        match field {
            ItemField::Description => None,
            ItemField::Quantity => Some(self.quantity),
            ItemField::UnitPrice => Some(self.unit_price),
            ItemField::Discount => Some(self.discount),
            ItemField::TaxRatePercent => Some(self.tax_rate_percent),
        }
    }

    pub(crate) fn set_numeric(&mut self, field: ItemField, value: Decimal) {
        match field {
            ItemField::Description => {}
            ItemField::Quantity => self.quantity = value,
            ItemField::UnitPrice => self.unit_price = value,
            ItemField::Discount => self.discount = value,
            ItemField::TaxRatePercent => self.tax_rate_percent = value,
        }
    }
}

/// Optional starting values for a new row; omitted fields take the defaults
/// (`quantity = 1`, everything else zero/empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSeed {
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub tax_rate_percent: Option<Decimal>,
}

impl ItemSeed {
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    pub fn quantity(mut self, value: Decimal) -> Self {
        self.quantity = Some(value);
        self
    }

    pub fn unit_price(mut self, value: Decimal) -> Self {
        self.unit_price = Some(value);
        self
    }

    pub fn discount(mut self, value: Decimal) -> Self {
        self.discount = Some(value);
        self
    }

    pub fn tax_rate_percent(mut self, value: Decimal) -> Self {
        self.tax_rate_percent = Some(value);
        self
    }

    pub(crate) fn numeric(&self, field: ItemField) -> Option<Decimal> {
        match field {
            ItemField::Description => None,
            ItemField::Quantity => self.quantity,
            ItemField::UnitPrice => self.unit_price,
            ItemField::Discount => self.discount,
            ItemField::TaxRatePercent => self.tax_rate_percent,
        }
    }
}

/// Editable field of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Description,
    Quantity,
    UnitPrice,
    Discount,
    TaxRatePercent,
}

impl ItemField {
    pub const NUMERIC: [ItemField; 4] = [
        ItemField::Quantity,
        ItemField::UnitPrice,
        ItemField::Discount,
        ItemField::TaxRatePercent,
    ];

    /// Form binding name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemField::Description => "description",
            ItemField::Quantity => "quantity",
            ItemField::UnitPrice => "unitPrice",
            ItemField::Discount => "discount",
            ItemField::TaxRatePercent => "taxRatePercent",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, ItemField::Description)
    }
}

impl core::fmt::Display for ItemField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "description" => Ok(ItemField::Description),
            "quantity" => Ok(ItemField::Quantity),
            "unitPrice" | "unit_price" | "price" => Ok(ItemField::UnitPrice),
            "discount" | "discountAmount" | "discount_amount" | "discountPercent"
            | "discount_percent" => Ok(ItemField::Discount),
            "taxRatePercent" | "tax_rate_percent" | "taxRate" | "tax" => {
                Ok(ItemField::TaxRatePercent)
            }
            other => Err(DomainError::validation(format!("unknown field: {other}"))),
        }
    }
}
