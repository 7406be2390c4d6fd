//! Numeric input coercion.
//!
//! Form inputs arrive as raw text on every keystroke. Under the lenient policy
//! anything unusable becomes a safe value instead of an error, so half-typed
//! entries never block data entry.

use core::str::FromStr;

use rust_decimal::Decimal;

use farmbooks_core::{DomainError, DomainResult};

use crate::config::{CoercionPolicy, DiscountModel};
use crate::item::ItemField;

/// Result of coercing one numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coerced {
    pub value: Decimal,
    /// The input was replaced (blank, unparsable, negative or capped).
    pub fell_back: bool,
}

impl Coerced {
    fn exact(value: Decimal) -> Self {
        Self {
            value,
            fell_back: false,
        }
    }

    fn fallback(value: Decimal) -> Self {
        Self {
            value,
            fell_back: true,
        }
    }
}

/// Upper bound for a field, if it is a percentage.
pub fn percent_cap(field: ItemField, model: DiscountModel) -> Option<Decimal> {
    match (field, model) {
        (ItemField::TaxRatePercent, _) => Some(Decimal::ONE_HUNDRED),
        (ItemField::Discount, DiscountModel::Percentage) => Some(Decimal::ONE_HUNDRED),
        _ => None,
    }
}

fn parse_number(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    // `Decimal::from_str` skips digit separators; typed input must not.
    if trimmed.is_empty() || trimmed.contains('_') {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Coerce raw text typed into a numeric field.
pub fn coerce_input(
    field: ItemField,
    raw: &str,
    policy: CoercionPolicy,
    cap: Option<Decimal>,
) -> DomainResult<Coerced> {
    match parse_number(raw) {
        Some(value) => coerce_amount(field, value, policy, cap),
        None => match policy {
            CoercionPolicy::Lenient => {
                tracing::warn!(%field, raw, "unparsable numeric input, using 0");
                Ok(Coerced::fallback(Decimal::ZERO))
            }
            CoercionPolicy::Strict if raw.trim().is_empty() => {
                Err(DomainError::invalid_field(field.as_str(), "value is required"))
            }
            CoercionPolicy::Strict => {
                Err(DomainError::invalid_field(field.as_str(), "not a number"))
            }
        },
    }
}

/// Bring an already-numeric value into the field's valid range.
pub fn coerce_amount(
    field: ItemField,
    value: Decimal,
    policy: CoercionPolicy,
    cap: Option<Decimal>,
) -> DomainResult<Coerced> {
    if value.is_sign_negative() && !value.is_zero() {
        return match policy {
            CoercionPolicy::Lenient => {
                tracing::warn!(%field, %value, "negative numeric input, clamping to 0");
                Ok(Coerced::fallback(Decimal::ZERO))
            }
            CoercionPolicy::Strict => {
                Err(DomainError::invalid_field(field.as_str(), "must not be negative"))
            }
        };
    }

    if let Some(cap) = cap {
        if value > cap {
            return match policy {
                CoercionPolicy::Lenient => {
                    tracing::warn!(%field, %value, %cap, "percentage above cap, clamping");
                    Ok(Coerced::fallback(cap))
                }
                CoercionPolicy::Strict => Err(DomainError::invalid_field(
                    field.as_str(),
                    format!("must not exceed {cap}"),
                )),
            };
        }
    }

    Ok(Coerced::exact(value.normalize()))
}
