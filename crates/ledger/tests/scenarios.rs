//! End-to-end ledger scenarios as a form drives them: add rows, type into
//! fields, remove rows, read totals back.

use farmbooks_core::DomainError;
use farmbooks_events::{EventBus, InMemoryEventBus, publish_all};
use farmbooks_ledger::{
    DiscountModel, ItemField, LedgerConfig, LedgerEvent, LineItemLedger, RemovalPolicy,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn ledger(model: DiscountModel, removal: RemovalPolicy) -> LineItemLedger {
    farmbooks_observability::init_for_tests();
    LineItemLedger::new(LedgerConfig::new(model, removal))
}

fn type_row(ledger: &mut LineItemLedger, index: usize, fields: [(ItemField, &str); 4]) {
    for (field, value) in fields {
        ledger.update_item(index, field, value).unwrap();
    }
}

#[test]
fn feed_purchase_line_with_tax() {
    let mut ledger = ledger(DiscountModel::Absolute, RemovalPolicy::Unrestricted);
    ledger.add_item(None).unwrap();
    type_row(
        &mut ledger,
        0,
        [
            (ItemField::Quantity, "10"),
            (ItemField::UnitPrice, "25000"),
            (ItemField::Discount, "0"),
            (ItemField::TaxRatePercent, "5"),
        ],
    );

    assert_eq!(ledger.line_total(0).unwrap(), dec!(262500.00));
}

#[test]
fn absolute_discount_is_taken_before_tax() {
    let mut ledger = ledger(DiscountModel::Absolute, RemovalPolicy::Unrestricted);
    ledger.add_item(None).unwrap();
    type_row(
        &mut ledger,
        0,
        [
            (ItemField::Quantity, "5"),
            (ItemField::UnitPrice, "120000"),
            (ItemField::Discount, "20000"),
            (ItemField::TaxRatePercent, "10"),
        ],
    );

    assert_eq!(
        DiscountModel::Absolute.discounted(&ledger.items()[0]),
        Some(dec!(580000))
    );
    assert_eq!(ledger.line_total(0).unwrap(), dec!(638000.00));
}

#[test]
fn two_rows_sum_to_grand_total() {
    let mut ledger = ledger(DiscountModel::Absolute, RemovalPolicy::MinimumOne);
    ledger.add_item(None).unwrap();
    type_row(
        &mut ledger,
        0,
        [
            (ItemField::Quantity, "10"),
            (ItemField::UnitPrice, "25000"),
            (ItemField::Discount, ""),
            (ItemField::TaxRatePercent, "5"),
        ],
    );
    type_row(
        &mut ledger,
        1,
        [
            (ItemField::Quantity, "1"),
            (ItemField::UnitPrice, "100000"),
            (ItemField::Discount, "0"),
            (ItemField::TaxRatePercent, "10"),
        ],
    );

    assert_eq!(ledger.line_totals(), vec![dec!(262500.00), dec!(110000.00)]);
    assert_eq!(ledger.grand_total(), dec!(372500.00));
}

#[test]
fn garbage_price_is_treated_as_zero() {
    let mut ledger = ledger(DiscountModel::Absolute, RemovalPolicy::Unrestricted);
    ledger.add_item(None).unwrap();
    ledger.update_item(0, ItemField::Quantity, "7").unwrap();

    let events = ledger.update_item(0, ItemField::UnitPrice, "abc").unwrap();

    assert_eq!(ledger.items()[0].unit_price, Decimal::ZERO);
    assert_eq!(ledger.line_total(0).unwrap(), Decimal::ZERO);
    assert_eq!(events.last().and_then(LedgerEvent::grand_total), Some(Decimal::ZERO));
}

#[test]
fn percentage_proposal_line() {
    let mut ledger = ledger(DiscountModel::Percentage, RemovalPolicy::MinimumOne);
    type_row(
        &mut ledger,
        0,
        [
            (ItemField::Quantity, "20"),
            (ItemField::UnitPrice, "1500"),
            (ItemField::Discount, "12.5"),
            (ItemField::TaxRatePercent, "18"),
        ],
    );

    // 30000 * 0.875 = 26250, * 1.18 = 30975
    assert_eq!(ledger.grand_total(), dec!(30975.00));
}

#[test]
fn removing_a_row_recomputes_remaining_total() {
    let mut ledger = ledger(DiscountModel::Absolute, RemovalPolicy::MinimumOne);
    ledger.update_item(0, ItemField::UnitPrice, "100").unwrap();
    ledger.add_item(None).unwrap();
    ledger.update_item(1, ItemField::UnitPrice, "40").unwrap();
    assert_eq!(ledger.grand_total(), dec!(140.00));

    ledger.remove_item(0).unwrap();
    assert_eq!(ledger.grand_total(), dec!(40.00));

    let err = ledger.remove_item(0).unwrap_err();
    assert_eq!(err, DomainError::validation("at least one item required"));
    assert_eq!(ledger.grand_total(), dec!(40.00));
}

#[test]
fn subscribers_see_every_mutation() {
    let mut ledger = ledger(DiscountModel::Absolute, RemovalPolicy::Unrestricted);
    let bus = InMemoryEventBus::new();
    let subscription = bus.subscribe();

    let mut emitted = ledger.add_item(None).unwrap();
    emitted.extend(ledger.update_item(0, ItemField::UnitPrice, "12.345").unwrap());
    emitted.extend(ledger.remove_item(0).unwrap());
    publish_all(&bus, emitted).unwrap();

    let received = subscription.drain();
    assert_eq!(received.len(), 6);
    assert!(matches!(received[0], LedgerEvent::ItemAdded(_)));
    assert_eq!(received[3].grand_total(), Some(dec!(12.35)));
    assert!(matches!(received[4], LedgerEvent::ItemRemoved(_)));
    assert_eq!(received[5].grand_total(), Some(Decimal::ZERO));
}
