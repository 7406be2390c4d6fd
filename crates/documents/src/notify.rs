//! User-facing notices derived from ledger events.
//!
//! The ledger knows nothing about toasts; a relay subscribed to the bus turns
//! the events into notices the UI layer shows.

use serde::Serialize;

use farmbooks_core::format_money;
use farmbooks_events::{EventBus, Subscription};
use farmbooks_ledger::LedgerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// Notice for an event, if it deserves one.
///
/// Plain keystrokes and recomputed totals produce nothing; totals are rendered
/// in place instead.
pub fn notice_for(event: &LedgerEvent) -> Option<Notice> {
    match event {
        LedgerEvent::ItemAdded(e) => Some(Notice::info(format!("Item {} added", e.index + 1))),
        LedgerEvent::ItemRemoved(e) => {
            Some(Notice::info(format!("Item {} removed", e.index + 1)))
        }
        LedgerEvent::ItemUpdated(e) if e.coerced => {
            let value = e
                .item
                .numeric(e.field)
                .map(format_money)
                .unwrap_or_default();
            Some(Notice::warning(format!(
                "Item {}: invalid {} replaced with {}",
                e.index + 1,
                e.field,
                value
            )))
        }
        LedgerEvent::ItemUpdated(_) | LedgerEvent::TotalsRecomputed(_) => None,
    }
}

/// Collects notices from a ledger event subscription.
#[derive(Debug)]
pub struct NotificationRelay {
    subscription: Subscription<LedgerEvent>,
    notices: Vec<Notice>,
}

impl NotificationRelay {
    pub fn subscribe<B>(bus: &B) -> Self
    where
        B: EventBus<LedgerEvent> + ?Sized,
    {
        Self {
            subscription: bus.subscribe(),
            notices: Vec::new(),
        }
    }

    /// Process every queued event; returns how many notices were produced.
    pub fn pump(&mut self) -> usize {
        let before = self.notices.len();
        for event in self.subscription.drain() {
            if let Some(notice) = notice_for(&event) {
                tracing::trace!(message = %notice.message, "notice raised");
                self.notices.push(notice);
            }
        }
        self.notices.len() - before
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmbooks_events::{InMemoryEventBus, publish_all};
    use farmbooks_ledger::{
        DiscountModel, ItemField, LedgerConfig, LineItemLedger, RemovalPolicy,
    };

    #[test]
    fn relay_turns_events_into_notices() {
        let bus = InMemoryEventBus::new();
        let mut relay = NotificationRelay::subscribe(&bus);
        let mut ledger = LineItemLedger::new(LedgerConfig::new(
            DiscountModel::Absolute,
            RemovalPolicy::Unrestricted,
        ));

        let mut events = ledger.add_item(None).unwrap();
        events.extend(ledger.update_item(0, ItemField::Quantity, "3").unwrap());
        events.extend(ledger.update_item(0, ItemField::UnitPrice, "abc").unwrap());
        events.extend(ledger.remove_item(0).unwrap());
        publish_all(&bus, events).unwrap();

        assert_eq!(relay.pump(), 3);
        let notices = relay.take_notices();
        assert_eq!(notices[0], Notice::info("Item 1 added"));
        assert_eq!(
            notices[1],
            Notice::warning("Item 1: invalid unitPrice replaced with 0.00")
        );
        assert_eq!(notices[2], Notice::info("Item 1 removed"));
        assert!(relay.notices().is_empty());
    }
}
