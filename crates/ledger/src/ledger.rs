//! The line-item ledger aggregate.

use rust_decimal::Decimal;
use serde::Serialize;

use farmbooks_core::{Aggregate, DomainError, DomainResult};
use farmbooks_events::{Event, execute};

use crate::coerce::{coerce_amount, coerce_input, percent_cap};
use crate::config::{CoercionPolicy, DiscountModel, LedgerConfig, RemovalPolicy};
use crate::event::{
    ItemAdded, ItemRemoved, ItemUpdated, LedgerCommand, LedgerEvent, TotalsRecomputed,
};
use crate::item::{ItemField, ItemSeed, LineItem};
use crate::strategy::grand_total;

/// Editable rows of one document plus their derived totals.
///
/// Totals are never stored: every accessor recomputes them from the current
/// rows, so they cannot drift from the items. Rows only change when their
/// totals stay within `Decimal` range, whether through a command or through
/// [`Aggregate::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemLedger {
    config: LedgerConfig,
    items: Vec<LineItem>,
    version: u64,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineView {
    pub index: usize,
    pub item: LineItem,
    pub line_total: Decimal,
}

/// Read-only view handed to renderers and exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    pub discount_model: DiscountModel,
    pub lines: Vec<LineView>,
    pub grand_total: Decimal,
}

impl LineItemLedger {
    /// Create a ledger. Minimum-one ledgers start with one blank row.
    pub fn new(config: LedgerConfig) -> Self {
        let items = match config.removal_policy {
            RemovalPolicy::MinimumOne => vec![LineItem::default()],
            RemovalPolicy::Unrestricted => Vec::new(),
        };
        Self {
            config,
            items,
            version: 0,
        }
    }

    /// Restore a ledger from previously saved rows.
    pub fn from_items(config: LedgerConfig, items: Vec<LineItem>) -> DomainResult<Self> {
        let mut ledger = Self::new(config);
        if !items.is_empty() {
            let items = items
                .iter()
                .map(|item| ledger.sanitize(item))
                .collect::<DomainResult<Vec<_>>>()?;
            ledger.totals_of(&items)?;
            ledger.items = items;
        }
        Ok(ledger)
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn discount_model(&self) -> DiscountModel {
        self.config.discount_model
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line_total(&self, index: usize) -> DomainResult<Decimal> {
        self.check_index(index)?;
        Ok(self.line_totals()[index])
    }

    pub fn line_totals(&self) -> Vec<Decimal> {
        self.config
            .discount_model
            .line_totals(&self.items)
            .unwrap_or_else(|| {
                // Unreachable: rows are only replaced after `totals_of` accepts them.
                tracing::error!(items = self.items.len(), "line total overflow");
                vec![Decimal::ZERO; self.items.len()]
            })
    }

    pub fn grand_total(&self) -> Decimal {
        grand_total(&self.line_totals()).unwrap_or_else(|| {
            tracing::error!(items = self.items.len(), "grand total overflow");
            Decimal::ZERO
        })
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let line_totals = self.line_totals();
        let grand_total = self.grand_total();
        let lines = self
            .items
            .iter()
            .zip(line_totals)
            .enumerate()
            .map(|(index, (item, line_total))| LineView {
                index,
                item: item.clone(),
                line_total,
            })
            .collect();
        LedgerSnapshot {
            discount_model: self.config.discount_model,
            lines,
            grand_total,
        }
    }

    /// Append a row (defaults: quantity 1, everything else zero).
    pub fn add_item(&mut self, seed: Option<ItemSeed>) -> DomainResult<Vec<LedgerEvent>> {
        self.run(LedgerCommand::AddItem(seed))
    }

    pub fn remove_item(&mut self, index: usize) -> DomainResult<Vec<LedgerEvent>> {
        self.run(LedgerCommand::RemoveItem { index })
    }

    /// Set one field from raw form input.
    pub fn update_item(
        &mut self,
        index: usize,
        field: ItemField,
        value: &str,
    ) -> DomainResult<Vec<LedgerEvent>> {
        self.run(LedgerCommand::UpdateItem {
            index,
            field,
            value: value.to_string(),
        })
    }

    fn run(&mut self, command: LedgerCommand) -> DomainResult<Vec<LedgerEvent>> {
        let events = execute(self, &command)
            .inspect_err(|err| tracing::debug!(%err, ?command, "ledger command rejected"))?;
        tracing::debug!(
            items = self.items.len(),
            grand_total = %self.grand_total(),
            version = self.version,
            "ledger updated"
        );
        Ok(events)
    }

    fn check_index(&self, index: usize) -> DomainResult<()> {
        if index >= self.items.len() {
            return Err(DomainError::validation("index out of range"));
        }
        Ok(())
    }

    fn totals_of(&self, items: &[LineItem]) -> DomainResult<TotalsRecomputed> {
        let out_of_range = || DomainError::validation("amount out of range");
        let line_totals = self
            .config
            .discount_model
            .line_totals(items)
            .ok_or_else(out_of_range)?;
        let grand_total = grand_total(&line_totals).ok_or_else(out_of_range)?;
        Ok(TotalsRecomputed {
            line_totals,
            grand_total,
        })
    }

    fn cap(&self, field: ItemField) -> Option<Decimal> {
        percent_cap(field, self.config.discount_model)
    }

    fn build_item(&self, seed: Option<&ItemSeed>) -> DomainResult<LineItem> {
        let mut item = LineItem::default();
        let Some(seed) = seed else {
            return Ok(item);
        };
        if let Some(description) = &seed.description {
            item.description = description.clone();
        }
        for field in ItemField::NUMERIC {
            if let Some(value) = seed.numeric(field) {
                let policy = self.config.coercion_policy;
                let coerced = coerce_amount(field, value, policy, self.cap(field))?;
                item.set_numeric(field, coerced.value);
            }
        }
        Ok(item)
    }

    fn sanitize(&self, item: &LineItem) -> DomainResult<LineItem> {
        let mut clean = item.clone();
        for field in ItemField::NUMERIC {
            if let Some(value) = item.numeric(field) {
                let policy = self.config.coercion_policy;
                let coerced = coerce_amount(field, value, policy, self.cap(field))?;
                clean.set_numeric(field, coerced.value);
            }
        }
        Ok(clean)
    }

    /// Clamp a row arriving through [`Aggregate::apply`], which cannot fail.
    fn admit(&self, item: &LineItem) -> LineItem {
        let mut clean = item.clone();
        for field in ItemField::NUMERIC {
            if let Some(value) = item.numeric(field) {
                let coerced = coerce_amount(field, value, CoercionPolicy::Lenient, self.cap(field))
                    .map_or(Decimal::ZERO, |c| c.value);
                clean.set_numeric(field, coerced);
            }
        }
        clean
    }

    fn handle_add(&self, seed: Option<&ItemSeed>) -> DomainResult<Vec<LedgerEvent>> {
        let item = self.build_item(seed)?;
        let mut next = self.items.clone();
        next.push(item.clone());
        let totals = self.totals_of(&next)?;

        Ok(vec![
            LedgerEvent::ItemAdded(ItemAdded {
                index: self.items.len(),
                item,
            }),
            LedgerEvent::TotalsRecomputed(totals),
        ])
    }

    fn handle_remove(&self, index: usize) -> DomainResult<Vec<LedgerEvent>> {
        self.check_index(index)?;
        if self.config.removal_policy == RemovalPolicy::MinimumOne && self.items.len() == 1 {
            return Err(DomainError::validation("at least one item required"));
        }

        let mut next = self.items.clone();
        let item = next.remove(index);
        let totals = self.totals_of(&next)?;

        Ok(vec![
            LedgerEvent::ItemRemoved(ItemRemoved { index, item }),
            LedgerEvent::TotalsRecomputed(totals),
        ])
    }

    fn handle_update(
        &self,
        index: usize,
        field: ItemField,
        value: &str,
    ) -> DomainResult<Vec<LedgerEvent>> {
        self.check_index(index)?;

        let mut item = self.items[index].clone();
        let coerced = if field.is_numeric() {
            let c = coerce_input(field, value, self.config.coercion_policy, self.cap(field))?;
            item.set_numeric(field, c.value);
            c.fell_back
        } else {
            item.description = value.to_string();
            false
        };

        let mut next = self.items.clone();
        next[index] = item.clone();
        let totals = self.totals_of(&next)?;

        Ok(vec![
            LedgerEvent::ItemUpdated(ItemUpdated {
                index,
                field,
                item,
                coerced,
            }),
            LedgerEvent::TotalsRecomputed(totals),
        ])
    }
}

impl Aggregate for LineItemLedger {
    type Command = LedgerCommand;
    type Event = LedgerEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        self.version += 1;

        let mut next = self.items.clone();
        match event {
            LedgerEvent::ItemAdded(e) => {
                let at = e.index.min(next.len());
                next.insert(at, self.admit(&e.item));
            }
            LedgerEvent::ItemUpdated(e) => {
                let item = self.admit(&e.item);
                match next.get_mut(e.index) {
                    Some(slot) => *slot = item,
                    None => return,
                }
            }
            LedgerEvent::ItemRemoved(e) => {
                if e.index >= next.len() {
                    return;
                }
                next.remove(e.index);
            }
            // Totals are derived from the items; nothing to store.
            LedgerEvent::TotalsRecomputed(_) => return,
        }

        match self.totals_of(&next) {
            Ok(_) => self.items = next,
            Err(err) => tracing::error!(
                %err,
                event = event.event_type(),
                "event would push totals out of range, rows left unchanged"
            ),
        }
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            LedgerCommand::AddItem(seed) => self.handle_add(seed.as_ref()),
            LedgerCommand::RemoveItem { index } => self.handle_remove(*index),
            LedgerCommand::UpdateItem {
                index,
                field,
                value,
            } => self.handle_update(*index, *field, value),
        }
    }
}
