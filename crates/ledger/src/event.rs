use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use farmbooks_events::Event;

use crate::item::{ItemField, ItemSeed, LineItem};

/// Mutations a form can request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCommand {
    /// Append a row, optionally pre-filled.
    AddItem(Option<ItemSeed>),
    RemoveItem { index: usize },
    /// Set one field from raw form input.
    UpdateItem {
        index: usize,
        field: ItemField,
        value: String,
    },
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub index: usize,
    pub item: LineItem,
}

/// Event: ItemUpdated. Carries the whole row after coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdated {
    pub index: usize,
    pub field: ItemField,
    pub item: LineItem,
    /// The raw input was replaced by a fallback value.
    pub coerced: bool,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub index: usize,
    pub item: LineItem,
}

/// Event: TotalsRecomputed. Emitted once after every accepted mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsRecomputed {
    pub line_totals: Vec<Decimal>,
    pub grand_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    ItemAdded(ItemAdded),
    ItemUpdated(ItemUpdated),
    ItemRemoved(ItemRemoved),
    TotalsRecomputed(TotalsRecomputed),
}

impl LedgerEvent {
    /// Grand total carried by a `TotalsRecomputed` event.
    pub fn grand_total(&self) -> Option<Decimal> {
        match self {
            LedgerEvent::TotalsRecomputed(e) => Some(e.grand_total),
            _ => None,
        }
    }
}

impl Event for LedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::ItemAdded(_) => "ledger.item.added",
            LedgerEvent::ItemUpdated(_) => "ledger.item.updated",
            LedgerEvent::ItemRemoved(_) => "ledger.item.removed",
            LedgerEvent::TotalsRecomputed(_) => "ledger.totals.recomputed",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}
