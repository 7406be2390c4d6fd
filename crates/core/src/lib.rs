//! `farmbooks-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the ledger and the
//! document kinds built on it (no infrastructure concerns).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod money;

pub use aggregate::Aggregate;
pub use error::{DomainError, DomainResult};
pub use id::{DocumentId, TenantId};
pub use money::{MONEY_DP, format_money, round_money};
