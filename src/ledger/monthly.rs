//! Month-scoped ledger view mixing single transactions and installment periods.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calendar::MonthRef;
use super::installments::{expand_installments, is_installment_candidate, VirtualInstallmentEntry};
use crate::config::EngineConfig;
use crate::domain::{CategoryLookup, Transaction, TransactionKind};
use crate::errors::EngineResult;

/// A row of the monthly view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "entryType", rename_all = "camelCase")]
pub enum MonthlyEntry {
    Transaction(Transaction),
    Installment(VirtualInstallmentEntry),
}

impl MonthlyEntry {
    /// Transaction date for single entries, due date for installment periods.
    pub fn display_date(&self) -> NaiveDate {
        match self {
            MonthlyEntry::Transaction(txn) => txn.date,
            MonthlyEntry::Installment(entry) => entry.due_date,
        }
    }

    pub fn amount(&self) -> f64 {
        match self {
            MonthlyEntry::Transaction(txn) => txn.amount,
            MonthlyEntry::Installment(entry) => entry.amount,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            MonthlyEntry::Transaction(txn) => &txn.description,
            MonthlyEntry::Installment(entry) => &entry.description,
        }
    }

    /// The stored transaction to edit or delete for this row.
    pub fn parent_id(&self) -> Uuid {
        match self {
            MonthlyEntry::Transaction(txn) => txn.id,
            MonthlyEntry::Installment(entry) => entry.parent_id,
        }
    }

    pub fn entry_key(&self) -> String {
        match self {
            MonthlyEntry::Transaction(txn) => txn.id.to_string(),
            MonthlyEntry::Installment(entry) => entry.key(),
        }
    }

    pub fn is_installment(&self) -> bool {
        matches!(self, MonthlyEntry::Installment(_))
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub total_revenue: f64,
    pub total_expense: f64,
    pub balance: f64,
}

impl MonthlySummary {
    /// Every installment period in scope counts as expense, paid or not.
    fn from_entries(entries: &[MonthlyEntry]) -> Self {
        let mut summary = MonthlySummary::default();
        for entry in entries {
            match entry {
                MonthlyEntry::Transaction(txn) => match txn.kind {
                    TransactionKind::Revenue => summary.total_revenue += txn.amount,
                    TransactionKind::Expense if !txn.is_installment => {
                        summary.total_expense += txn.amount
                    }
                    TransactionKind::Expense => {}
                },
                MonthlyEntry::Installment(period) => summary.total_expense += period.amount,
            }
        }
        summary.balance = summary.total_revenue - summary.total_expense;
        summary
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyView {
    pub month: MonthRef,
    pub entries: Vec<MonthlyEntry>,
    pub summary: MonthlySummary,
}

/// Builds the view for `month`, newest display date first.
///
/// Single transactions are matched on their own date and installment periods on
/// their due date. Recurring transactions are treated as single transactions.
pub fn build_monthly_view<L>(
    transactions: &[Transaction],
    month: MonthRef,
    categories: &L,
    config: &EngineConfig,
) -> EngineResult<MonthlyView>
where
    L: CategoryLookup + ?Sized,
{
    let mut singles = Vec::new();
    let mut periods = Vec::new();
    for txn in transactions {
        if is_installment_candidate(txn) {
            let expanded = expand_installments(txn, categories, config)?;
            periods.extend(
                expanded
                    .into_iter()
                    .filter(|entry| month.contains(entry.due_date))
                    .map(MonthlyEntry::Installment),
            );
        } else {
            txn.validate()?;
            if month.contains(txn.date) {
                singles.push(MonthlyEntry::Transaction(txn.clone()));
            }
        }
    }

    let mut entries = singles;
    entries.extend(periods);
    entries.sort_by(|a, b| b.display_date().cmp(&a.display_date()));
    let summary = MonthlySummary::from_entries(&entries);
    tracing::debug!(
        %month,
        entries = entries.len(),
        total_expense = %config.format_amount(summary.total_expense),
        "built monthly view"
    );
    Ok(MonthlyView {
        month,
        entries,
        summary,
    })
}
