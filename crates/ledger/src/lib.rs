//! Itemized financial-document computation.
//!
//! A [`LineItemLedger`] owns the editable rows of one document (invoice,
//! contract, proposal, payslip) and derives every line total and the grand
//! total from the current rows on demand. All logic is deterministic and
//! synchronous (no IO, no clock, no notification side effects).

pub mod coerce;
pub mod config;
pub mod event;
pub mod item;
pub mod ledger;
pub mod strategy;

pub use coerce::{Coerced, coerce_amount, coerce_input};
pub use config::{CoercionPolicy, DiscountModel, DocumentKind, LedgerConfig, RemovalPolicy};
pub use event::{LedgerCommand, LedgerEvent};
pub use item::{ItemField, ItemSeed, LineItem};
pub use ledger::{LedgerSnapshot, LineItemLedger, LineView};
