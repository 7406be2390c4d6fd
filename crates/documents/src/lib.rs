//! Financial documents built on the line-item ledger.
//!
//! Each document kind (invoice, contract, proposal, payslip) is an explicit
//! header record sharing one [`LineItemLedger`](farmbooks_ledger::LineItemLedger).
//! This crate also prepares the numbers handed to exporters, turns ledger
//! events into user-facing notices, and defines the storage collaborator a
//! submitted document is handed to. No IO happens here.

pub mod document;
pub mod export;
pub mod notify;
pub mod record;
pub mod store;

pub use document::{
    ContractHeader, DocumentHeader, FinancialDocument, InvoiceHeader, PayslipHeader,
    ProposalHeader, SubmitError,
};
pub use export::ExportTable;
pub use notify::{Notice, NoticeLevel, NotificationRelay, notice_for};
pub use record::DocumentRecord;
pub use store::{DocumentStore, InMemoryDocumentStore, StoreError};

pub use farmbooks_ledger::DocumentKind;
