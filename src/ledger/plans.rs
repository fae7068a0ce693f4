//! Lifecycle classification of installment plans and the plan catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::installments::{is_installment_candidate, resolve_category};
use crate::config::EngineConfig;
use crate::domain::{Category, CategoryLookup, InstallmentPlan, PaymentMethod, Transaction};
use crate::errors::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Active,
    Overdue,
    Completed,
}

impl PlanStatus {
    /// A plan is overdue once its first unpaid period fell due before `today`.
    fn classify(plan: &InstallmentPlan, today: NaiveDate) -> PlanStatus {
        match plan.next_due_date() {
            None => PlanStatus::Completed,
            Some(next_due) if next_due < today => PlanStatus::Overdue,
            Some(_) => PlanStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentPlanSummary {
    pub id: Uuid,
    pub description: String,
    pub payment_method: PaymentMethod,
    pub category: Category,
    pub total_amount: f64,
    pub period_amount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub next_due_date: Option<NaiveDate>,
    pub total_periods: u32,
    pub paid_periods: u32,
    pub pending_periods: u32,
    pub paid_amount: f64,
    pub pending_amount: f64,
    pub status: PlanStatus,
}

/// Summarizes one installment transaction as of `today`.
///
/// `Ok(None)` means the category did not resolve and the plan is omitted.
pub fn classify_plan<L>(
    txn: &Transaction,
    today: NaiveDate,
    categories: &L,
    config: &EngineConfig,
) -> EngineResult<Option<InstallmentPlanSummary>>
where
    L: CategoryLookup + ?Sized,
{
    txn.validate()?;
    let plan = txn
        .installments()
        .ok_or_else(|| EngineError::installment(txn.id, "not an installment transaction"))?;
    let Some(category) = resolve_category(txn, categories, config) else {
        return Ok(None);
    };
    let end_date = plan
        .end_date()
        .ok_or_else(|| EngineError::installment(txn.id, "plan has no valid end date"))?;

    let period_amount = plan.period_amount(txn.amount);
    let pending_periods = plan.pending_periods();
    Ok(Some(InstallmentPlanSummary {
        id: txn.id,
        description: txn.description.clone(),
        payment_method: txn.payment_method,
        category,
        total_amount: txn.amount,
        period_amount,
        start_date: plan.start_date,
        end_date,
        next_due_date: plan.next_due_date(),
        total_periods: plan.total_periods,
        paid_periods: plan.paid_periods,
        pending_periods,
        paid_amount: f64::from(plan.paid_periods) * period_amount,
        pending_amount: f64::from(pending_periods) * period_amount,
        status: PlanStatus::classify(plan, today),
    }))
}

/// Classifies every installment transaction, newest start date first.
pub fn plan_catalog<L>(
    transactions: &[Transaction],
    today: NaiveDate,
    categories: &L,
    config: &EngineConfig,
) -> EngineResult<Vec<InstallmentPlanSummary>>
where
    L: CategoryLookup + ?Sized,
{
    let mut catalog = Vec::new();
    let mut omitted = 0usize;
    for txn in transactions.iter().filter(|t| is_installment_candidate(t)) {
        match classify_plan(txn, today, categories, config)? {
            Some(summary) => catalog.push(summary),
            None => omitted += 1,
        }
    }
    catalog.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    tracing::debug!(plans = catalog.len(), omitted, %today, "built installment plan catalog");
    Ok(catalog)
}
