//! Persisted form of a submitted document.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use farmbooks_core::{DocumentId, TenantId};
use farmbooks_ledger::{DiscountModel, DocumentKind, LineItem};

use crate::document::DocumentHeader;

/// Snapshot handed to the storage collaborator on submit.
///
/// `line_totals`, `grand_total` and `net_total` are copies of what the ledger
/// computed at submission time, kept so readers never need to recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub tenant_id: TenantId,
    #[serde(flatten)]
    pub header: DocumentHeader,
    pub discount_model: DiscountModel,
    pub items: Vec<LineItem>,
    pub line_totals: Vec<Decimal>,
    pub grand_total: Decimal,
    pub net_total: Decimal,
    pub submitted_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn kind(&self) -> DocumentKind {
        self.header.kind()
    }

    /// JSON row as inserted into a records table.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn from_json(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}
