//! Expansion of installment transactions into their per-period obligations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{EngineConfig, UncategorizedPolicy};
use crate::domain::{Category, CategoryLookup, PaymentMethod, Transaction};
use crate::errors::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    Paid,
    Pending,
}

impl InstallmentStatus {
    fn for_period(period: u32, paid_periods: u32) -> Self {
        if period <= paid_periods {
            InstallmentStatus::Paid
        } else {
            InstallmentStatus::Pending
        }
    }
}

/// One period of an installment plan. Derived on every query and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualInstallmentEntry {
    pub parent_id: Uuid,
    /// 1-based period index.
    pub period: u32,
    pub total_periods: u32,
    pub due_date: NaiveDate,
    pub amount: f64,
    pub status: InstallmentStatus,
    pub description: String,
    pub category: Category,
    pub payment_method: PaymentMethod,
}

impl VirtualInstallmentEntry {
    pub fn is_paid(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }

    /// Stable key for list rendering, e.g. `<parent>-3`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.parent_id, self.period)
    }
}

/// Resolves the category of `txn`, applying the configured policy when the id dangles.
pub(crate) fn resolve_category<L>(
    txn: &Transaction,
    categories: &L,
    config: &EngineConfig,
) -> Option<Category>
where
    L: CategoryLookup + ?Sized,
{
    if let Some(category) = categories.category(txn.category_id) {
        return Some(category.clone());
    }
    match config.uncategorized_policy {
        UncategorizedPolicy::Omit => {
            tracing::debug!(
                transaction = %txn.id,
                category = %txn.category_id,
                "category does not resolve, omitting transaction"
            );
            None
        }
        UncategorizedPolicy::Sentinel => {
            tracing::debug!(
                transaction = %txn.id,
                category = %txn.category_id,
                "category does not resolve, using placeholder"
            );
            Some(Category::uncategorized(
                config.uncategorized_label.clone(),
                txn.kind.into(),
            ))
        }
    }
}

/// Materializes every period of one installment transaction, in period order.
///
/// Returns an empty list when the category does not resolve and the policy is
/// [`UncategorizedPolicy::Omit`]. Malformed plan metadata is an error.
pub fn expand_installments<L>(
    txn: &Transaction,
    categories: &L,
    config: &EngineConfig,
) -> EngineResult<Vec<VirtualInstallmentEntry>>
where
    L: CategoryLookup + ?Sized,
{
    txn.validate()?;
    let plan = txn
        .installments()
        .ok_or_else(|| EngineError::installment(txn.id, "not an installment transaction"))?;
    let Some(category) = resolve_category(txn, categories, config) else {
        return Ok(Vec::new());
    };

    let amount = plan.period_amount(txn.amount);
    (1..=plan.total_periods)
        .map(|period| -> EngineResult<VirtualInstallmentEntry> {
            let due_date = plan.due_date(period).ok_or_else(|| {
                EngineError::installment(txn.id, format!("period {} has no valid due date", period))
            })?;
            Ok(VirtualInstallmentEntry {
                parent_id: txn.id,
                period,
                total_periods: plan.total_periods,
                due_date,
                amount,
                status: InstallmentStatus::for_period(period, plan.paid_periods),
                description: txn.description.clone(),
                category: category.clone(),
                payment_method: txn.payment_method,
            })
        })
        .collect()
}

/// Expands every installment transaction in input order.
pub fn expand_all<L>(
    transactions: &[Transaction],
    categories: &L,
    config: &EngineConfig,
) -> EngineResult<Vec<VirtualInstallmentEntry>>
where
    L: CategoryLookup + ?Sized,
{
    let mut entries = Vec::new();
    for txn in transactions.iter().filter(|t| is_installment_candidate(t)) {
        entries.extend(expand_installments(txn, categories, config)?);
    }
    Ok(entries)
}

/// Transactions that claim to be installment plans in either flag or payload.
/// Both must agree, which `Transaction::validate` enforces.
pub(crate) fn is_installment_candidate(txn: &Transaction) -> bool {
    txn.is_installment || txn.installment_plan.is_some()
}
