use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use farmbooks_core::{DocumentId, DomainError, DomainResult, TenantId, round_money};
use farmbooks_ledger::{DocumentKind, LedgerConfig, LineItemLedger};

use crate::record::DocumentRecord;
use crate::store::{DocumentStore, StoreError};

/// Invoice header: who is billed and when payment is due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceHeader {
    pub customer: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// Supply/service contract header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractHeader {
    pub party: String,
    pub start_date: NaiveDate,
    /// Open-ended when absent.
    pub end_date: Option<NaiveDate>,
}

/// Price proposal header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalHeader {
    pub client: String,
    pub valid_until: NaiveDate,
}

/// Payslip header. Ledger lines are the earnings; deductions are subtracted
/// from their grand total to give the net salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipHeader {
    pub employee: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub deductions: Decimal,
}

/// Kind-specific part of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentHeader {
    Invoice(InvoiceHeader),
    Contract(ContractHeader),
    Proposal(ProposalHeader),
    Payslip(PayslipHeader),
}

impl DocumentHeader {
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentHeader::Invoice(_) => DocumentKind::Invoice,
            DocumentHeader::Contract(_) => DocumentKind::Contract,
            DocumentHeader::Proposal(_) => DocumentKind::Proposal,
            DocumentHeader::Payslip(_) => DocumentKind::Payslip,
        }
    }

    /// Name of the customer, party, client or employee.
    pub fn counterparty(&self) -> &str {
        match self {
            DocumentHeader::Invoice(h) => &h.customer,
            DocumentHeader::Contract(h) => &h.party,
            DocumentHeader::Proposal(h) => &h.client,
            DocumentHeader::Payslip(h) => &h.employee,
        }
    }

    /// Header checks run before a document is submitted.
    pub fn validate(&self) -> DomainResult<()> {
        if self.counterparty().trim().is_empty() {
            let field = match self {
                DocumentHeader::Invoice(_) => "customer",
                DocumentHeader::Contract(_) => "party",
                DocumentHeader::Proposal(_) => "client",
                DocumentHeader::Payslip(_) => "employee",
            };
            return Err(DomainError::invalid_field(field, "is required"));
        }

        match self {
            DocumentHeader::Invoice(h) if h.due_date < h.issue_date => Err(
                DomainError::invalid_field("due_date", "must not be before issue_date"),
            ),
            DocumentHeader::Contract(h) if h.end_date.is_some_and(|end| end < h.start_date) => Err(
                DomainError::invalid_field("end_date", "must not be before start_date"),
            ),
            DocumentHeader::Payslip(h) if h.period_end < h.period_start => Err(
                DomainError::invalid_field("period_end", "must not be before period_start"),
            ),
            DocumentHeader::Payslip(h) if h.deductions < Decimal::ZERO => {
                Err(DomainError::invalid_field("deductions", "must not be negative"))
            }
            _ => Ok(()),
        }
    }

    /// Amount finally owed: the grand total, less deductions on payslips.
    pub fn net_total(&self, grand_total: Decimal) -> DomainResult<Decimal> {
        match self {
            DocumentHeader::Payslip(h) => grand_total
                .checked_sub(h.deductions)
                .map(round_money)
                .ok_or_else(|| DomainError::validation("amount out of range")),
            _ => Ok(grand_total),
        }
    }
}

/// Failure to submit a document.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A document being edited: its header plus its own ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialDocument {
    id: DocumentId,
    header: DocumentHeader,
    ledger: LineItemLedger,
}

impl FinancialDocument {
    /// New document using the default ledger strategy for its kind.
    pub fn new(header: DocumentHeader) -> Self {
        let config = LedgerConfig::for_kind(header.kind());
        Self::with_config(header, config)
    }

    pub fn with_config(header: DocumentHeader, config: LedgerConfig) -> Self {
        Self {
            id: DocumentId::new(),
            header,
            ledger: LineItemLedger::new(config),
        }
    }

    /// Re-open a submitted record for editing.
    pub fn from_record(record: &DocumentRecord) -> DomainResult<Self> {
        let config = LedgerConfig {
            discount_model: record.discount_model,
            ..LedgerConfig::for_kind(record.header.kind())
        };
        let ledger = LineItemLedger::from_items(config, record.items.clone())?;
        Ok(Self {
            id: record.id,
            header: record.header.clone(),
            ledger,
        })
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn kind(&self) -> DocumentKind {
        self.header.kind()
    }

    pub fn header(&self) -> &DocumentHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut DocumentHeader {
        &mut self.header
    }

    pub fn ledger(&self) -> &LineItemLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut LineItemLedger {
        &mut self.ledger
    }

    pub fn grand_total(&self) -> Decimal {
        self.ledger.grand_total()
    }

    pub fn net_total(&self) -> DomainResult<Decimal> {
        self.header.net_total(self.ledger.grand_total())
    }

    /// Validate and snapshot the document into its persisted form.
    pub fn to_record(
        &self,
        tenant_id: TenantId,
        submitted_at: DateTime<Utc>,
    ) -> DomainResult<DocumentRecord> {
        self.header.validate()?;
        if self.ledger.is_empty() {
            return Err(DomainError::validation("at least one item required"));
        }

        let snapshot = self.ledger.snapshot();
        let net_total = self.header.net_total(snapshot.grand_total)?;
        Ok(DocumentRecord {
            id: self.id,
            tenant_id,
            header: self.header.clone(),
            discount_model: snapshot.discount_model,
            items: snapshot.lines.iter().map(|l| l.item.clone()).collect(),
            line_totals: snapshot.lines.iter().map(|l| l.line_total).collect(),
            grand_total: snapshot.grand_total,
            net_total,
            submitted_at,
        })
    }

    /// Snapshot the document and hand it to the storage collaborator.
    pub fn submit<S>(
        &self,
        tenant_id: TenantId,
        store: &S,
        submitted_at: DateTime<Utc>,
    ) -> Result<DocumentRecord, SubmitError>
    where
        S: DocumentStore + ?Sized,
    {
        let record = self.to_record(tenant_id, submitted_at)?;
        store.insert(record.clone())?;
        tracing::info!(
            document_id = %record.id,
            kind = %record.kind(),
            items = record.items.len(),
            grand_total = %record.grand_total,
            "document submitted"
        );
        Ok(record)
    }
}
