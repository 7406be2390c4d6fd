//! Submitting edited documents to the records store.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use farmbooks_core::{DomainError, TenantId};
use farmbooks_documents::{
    ContractHeader, DocumentHeader, DocumentKind, DocumentStore, ExportTable, FinancialDocument,
    InMemoryDocumentStore, InvoiceHeader, PayslipHeader, StoreError, SubmitError,
};
use farmbooks_ledger::{ItemField, ItemSeed};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn invoice() -> FinancialDocument {
    farmbooks_observability::init_for_tests();
    let mut doc = FinancialDocument::new(DocumentHeader::Invoice(InvoiceHeader {
        customer: "Green Valley Dairy".to_string(),
        issue_date: date(2026, 3, 1),
        due_date: date(2026, 3, 31),
    }));
    let ledger = doc.ledger_mut();
    ledger.update_item(0, ItemField::Description, "Cattle feed (bags)").unwrap();
    ledger.update_item(0, ItemField::Quantity, "10").unwrap();
    ledger.update_item(0, ItemField::UnitPrice, "25000").unwrap();
    ledger.update_item(0, ItemField::TaxRatePercent, "5").unwrap();
    ledger
        .add_item(Some(
            ItemSeed::described("Vaccination")
                .quantity(dec!(5))
                .unit_price(dec!(120000))
                .discount(dec!(20000))
                .tax_rate_percent(dec!(10)),
        ))
        .unwrap();
    doc
}

#[test]
fn submitted_invoice_is_stored_with_totals() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let tenant = TenantId::new();
    let doc = invoice();

    let record = doc
        .submit(tenant, &store, Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap())
        .unwrap();

    assert_eq!(record.line_totals, vec![dec!(262500.00), dec!(638000.00)]);
    assert_eq!(record.grand_total, dec!(900500.00));
    assert_eq!(store.get(tenant, doc.id()), Some(record.clone()));
    assert!(store.get(TenantId::new(), doc.id()).is_none());

    let table = ExportTable::from_record(&record);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.column_total(), record.grand_total);
}

#[test]
fn resubmitting_the_same_document_is_a_duplicate() {
    let store = InMemoryDocumentStore::new();
    let tenant = TenantId::new();
    let doc = invoice();

    doc.submit(tenant, &store, Utc::now()).unwrap();
    let err = doc.submit(tenant, &store, Utc::now()).unwrap_err();
    assert!(matches!(err, SubmitError::Store(StoreError::Duplicate(id)) if id == doc.id()));
}

#[test]
fn invalid_header_never_reaches_the_store() {
    let store = InMemoryDocumentStore::new();
    let tenant = TenantId::new();
    let mut doc = invoice();
    if let DocumentHeader::Invoice(h) = doc.header_mut() {
        h.customer.clear();
    }

    let err = doc.submit(tenant, &store, Utc::now()).unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Domain(DomainError::InvalidField { ref field, .. }) if field == "customer"
    ));
    assert!(store.list(tenant, None).is_empty());
}

#[test]
fn listing_filters_by_kind_in_submission_order() {
    let store = InMemoryDocumentStore::new();
    let tenant = TenantId::new();

    let first = invoice();
    first
        .submit(tenant, &store, Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap())
        .unwrap();

    let mut contract = FinancialDocument::new(DocumentHeader::Contract(ContractHeader {
        party: "Co-op Feeds".to_string(),
        start_date: date(2026, 1, 1),
        end_date: Some(date(2026, 12, 31)),
    }));
    contract
        .ledger_mut()
        .add_item(Some(
            ItemSeed::described("Monthly supply")
                .quantity(dec!(12))
                .unit_price(dec!(5000))
                .discount(dec!(10)),
        ))
        .unwrap();
    contract
        .submit(tenant, &store, Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap())
        .unwrap();

    let second = invoice();
    second
        .submit(tenant, &store, Utc.with_ymd_and_hms(2026, 3, 3, 9, 0, 0).unwrap())
        .unwrap();

    let invoices = store.list(tenant, Some(DocumentKind::Invoice));
    assert_eq!(
        invoices.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![first.id(), second.id()]
    );

    let contracts = store.list(tenant, Some(DocumentKind::Contract));
    assert_eq!(contracts.len(), 1);
    // 60000 less 10% = 54000
    assert_eq!(contracts[0].grand_total, dec!(54000.00));
    assert_eq!(store.list(tenant, None).len(), 3);
}

#[test]
fn payslip_export_shows_net_salary() {
    let store = InMemoryDocumentStore::new();
    let mut slip = FinancialDocument::new(DocumentHeader::Payslip(PayslipHeader {
        employee: "Ravi".to_string(),
        period_start: date(2026, 2, 1),
        period_end: date(2026, 2, 28),
        deductions: dec!(1800),
    }));
    slip.ledger_mut()
        .add_item(Some(ItemSeed::described("Basic salary").unit_price(dec!(18000))))
        .unwrap();
    slip.ledger_mut()
        .add_item(Some(
            ItemSeed::described("Milking shifts")
                .quantity(dec!(8))
                .unit_price(dec!(150)),
        ))
        .unwrap();

    let record = slip.submit(TenantId::new(), &store, Utc::now()).unwrap();
    assert_eq!(record.net_total, dec!(17400.00));

    let table = ExportTable::from_record(&record);
    assert_eq!(
        table.footer,
        vec![
            ("Grand total".to_string(), "19200.00".to_string()),
            ("Deductions".to_string(), "1800.00".to_string()),
            ("Net salary".to_string(), "17400.00".to_string()),
        ]
    );
}
