//! Per-document ledger configuration.

use core::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use farmbooks_core::DomainError;

pub const ENV_DISCOUNT_MODEL: &str = "FARMBOOKS_DISCOUNT_MODEL";
pub const ENV_REMOVAL_POLICY: &str = "FARMBOOKS_REMOVAL_POLICY";
pub const ENV_COERCION_POLICY: &str = "FARMBOOKS_COERCION_POLICY";

/// How a line's `discount` field is interpreted before tax is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountModel {
    /// Model A: `discount` is a percentage (0–100) of the base amount.
    Percentage,
    /// Model B: `discount` is an absolute amount subtracted from the base.
    Absolute,
}

/// Whether the last remaining row may be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    Unrestricted,
    MinimumOne,
}

/// What happens to blank, unparsable, negative or out-of-range numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Blank/unparsable → 0, negative → 0, percentages capped at 100.
    Lenient,
    /// The same input is rejected with `DomainError::InvalidField`.
    Strict,
}

/// Kind of financial document a ledger belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Contract,
    Proposal,
    Payslip,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Contract => "contract",
            DocumentKind::Proposal => "proposal",
            DocumentKind::Payslip => "payslip",
        }
    }
}

impl core::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub discount_model: DiscountModel,
    pub removal_policy: RemovalPolicy,
    pub coercion_policy: CoercionPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            discount_model: DiscountModel::Absolute,
            removal_policy: RemovalPolicy::Unrestricted,
            coercion_policy: CoercionPolicy::Lenient,
        }
    }
}

impl LedgerConfig {
    pub fn new(discount_model: DiscountModel, removal_policy: RemovalPolicy) -> Self {
        Self {
            discount_model,
            removal_policy,
            coercion_policy: CoercionPolicy::Lenient,
        }
    }

    /// Default strategy for each document kind.
    ///
    /// Invoices and payslips take absolute discounts; contracts and proposals
    /// quote percentage discounts. Customer-facing documents keep at least one row.
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Invoice => Self::new(DiscountModel::Absolute, RemovalPolicy::MinimumOne),
            DocumentKind::Proposal => {
                Self::new(DiscountModel::Percentage, RemovalPolicy::MinimumOne)
            }
            DocumentKind::Contract => {
                Self::new(DiscountModel::Percentage, RemovalPolicy::Unrestricted)
            }
            DocumentKind::Payslip => {
                Self::new(DiscountModel::Absolute, RemovalPolicy::Unrestricted)
            }
        }
    }

    pub fn with_coercion(mut self, policy: CoercionPolicy) -> Self {
        self.coercion_policy = policy;
        self
    }

    /// Apply `FARMBOOKS_*` environment overrides on top of `base`.
    pub fn from_env(base: LedgerConfig) -> anyhow::Result<Self> {
        Self::from_lookup(base, |key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup (environment, settings file).
    pub fn from_lookup<F>(base: LedgerConfig, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = base;
        if let Some(raw) = lookup(ENV_DISCOUNT_MODEL) {
            config.discount_model = raw
                .parse()
                .with_context(|| format!("{ENV_DISCOUNT_MODEL}={raw}"))?;
        }
        if let Some(raw) = lookup(ENV_REMOVAL_POLICY) {
            config.removal_policy = raw
                .parse()
                .with_context(|| format!("{ENV_REMOVAL_POLICY}={raw}"))?;
        }
        if let Some(raw) = lookup(ENV_COERCION_POLICY) {
            config.coercion_policy = raw
                .parse()
                .with_context(|| format!("{ENV_COERCION_POLICY}={raw}"))?;
        }
        tracing::debug!(?config, "resolved ledger config");
        Ok(config)
    }
}

fn normalized(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace('-', "_")
}

impl FromStr for DiscountModel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "percentage" | "percent" | "model_a" | "a" => Ok(DiscountModel::Percentage),
            "absolute" | "amount" | "model_b" | "b" => Ok(DiscountModel::Absolute),
            other => Err(DomainError::validation(format!("unknown discount model: {other}"))),
        }
    }
}

impl FromStr for RemovalPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "unrestricted" => Ok(RemovalPolicy::Unrestricted),
            "minimum_one" | "min_one" => Ok(RemovalPolicy::MinimumOne),
            other => Err(DomainError::validation(format!("unknown removal policy: {other}"))),
        }
    }
}

impl FromStr for CoercionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "lenient" => Ok(CoercionPolicy::Lenient),
            "strict" => Ok(CoercionPolicy::Strict),
            other => Err(DomainError::validation(format!("unknown coercion policy: {other}"))),
        }
    }
}
