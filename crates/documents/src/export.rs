//! Numeric inputs for the CSV/PDF/Excel writers.
//!
//! Writers receive ready-formatted strings so every export shows the same
//! two-decimal figures the ledger computed. Producing file bytes is the
//! writers' job.

use rust_decimal::Decimal;
use serde::Serialize;

use farmbooks_core::format_money;
use farmbooks_ledger::{DiscountModel, LedgerSnapshot, LineItem};

use crate::document::DocumentHeader;
use crate::record::DocumentRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Labelled totals printed under the table.
    pub footer: Vec<(String, String)>,
}

fn headers(model: DiscountModel) -> Vec<String> {
    let discount = match model {
        DiscountModel::Percentage => "Discount %",
        DiscountModel::Absolute => "Discount",
    };
    ["#", "Description", "Quantity", "Unit price", discount, "Tax %", "Line total"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn row(index: usize, item: &LineItem, line_total: Decimal) -> Vec<String> {
    vec![
        (index + 1).to_string(),
        item.description.clone(),
        format_money(item.quantity),
        format_money(item.unit_price),
        format_money(item.discount),
        format_money(item.tax_rate_percent),
        format_money(line_total),
    ]
}

impl ExportTable {
    pub fn from_snapshot(snapshot: &LedgerSnapshot) -> Self {
        Self {
            headers: headers(snapshot.discount_model),
            rows: snapshot
                .lines
                .iter()
                .map(|l| row(l.index, &l.item, l.line_total))
                .collect(),
            footer: vec![("Grand total".to_string(), format_money(snapshot.grand_total))],
        }
    }

    /// Table for a submitted record, adding deductions and net salary for payslips.
    pub fn from_record(record: &DocumentRecord) -> Self {
        let rows = record
            .items
            .iter()
            .zip(&record.line_totals)
            .enumerate()
            .map(|(i, (item, total))| row(i, item, *total))
            .collect();

        let mut footer = vec![("Grand total".to_string(), format_money(record.grand_total))];
        if let DocumentHeader::Payslip(h) = &record.header {
            footer.push(("Deductions".to_string(), format_money(h.deductions)));
            footer.push(("Net salary".to_string(), format_money(record.net_total)));
        }

        Self {
            headers: headers(record.discount_model),
            rows,
            footer,
        }
    }

    /// Sum of the line-total column.
    pub fn column_total(&self) -> Decimal {
        self.rows
            .iter()
            .filter_map(|r| r.last())
            .filter_map(|cell| cell.parse::<Decimal>().ok())
            .sum()
    }
}
