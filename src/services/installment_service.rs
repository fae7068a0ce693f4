//! Business logic helpers for installment plans.

use uuid::Uuid;

use crate::config::EngineConfig;
use crate::domain::{CategoryLookup, Displayable, Identifiable, Transaction};
use crate::errors::EngineError;
use crate::ledger::{
    classify_plan, expand_installments, plan_catalog, InstallmentPlanSummary, MonthlyEntry,
    VirtualInstallmentEntry,
};
use crate::services::clock::Clock;
use crate::services::{ServiceError, ServiceResult};

/// Ties the plan engine to a clock and to the caller's transaction list.
pub struct InstallmentService;

impl InstallmentService {
    /// Full plan dashboard as of the clock's current date.
    pub fn catalog<L>(
        transactions: &[Transaction],
        categories: &L,
        clock: &dyn Clock,
        config: &EngineConfig,
    ) -> ServiceResult<Vec<InstallmentPlanSummary>>
    where
        L: CategoryLookup + ?Sized,
    {
        plan_catalog(transactions, clock.today(), categories, config).map_err(ServiceError::from)
    }

    /// Summary of a single plan; `None` when its category does not resolve.
    pub fn plan<L>(
        transactions: &[Transaction],
        id: Uuid,
        categories: &L,
        clock: &dyn Clock,
        config: &EngineConfig,
    ) -> ServiceResult<Option<InstallmentPlanSummary>>
    where
        L: CategoryLookup + ?Sized,
    {
        let txn = find(transactions, id)?;
        classify_plan(txn, clock.today(), categories, config).map_err(ServiceError::from)
    }

    /// All periods of the plan identified by `id`.
    pub fn schedule<L>(
        transactions: &[Transaction],
        id: Uuid,
        categories: &L,
        config: &EngineConfig,
    ) -> ServiceResult<Vec<VirtualInstallmentEntry>>
    where
        L: CategoryLookup + ?Sized,
    {
        let txn = find(transactions, id)?;
        expand_installments(txn, categories, config).map_err(ServiceError::from)
    }

    /// Marks the plan paid up to `period` and returns the new paid count.
    pub fn mark_paid_through(
        transactions: &mut [Transaction],
        id: Uuid,
        period: u32,
    ) -> ServiceResult<u32> {
        let txn = transactions
            .iter_mut()
            .find(|txn| txn.has_id(id))
            .ok_or(EngineError::TransactionNotFound(id))?;
        let paid = txn.mark_paid_through(period)?;
        tracing::info!(
            transaction = %id,
            label = %txn.display_label(),
            paid,
            "installments marked as paid"
        );
        Ok(paid)
    }

    /// The stored transaction behind a monthly row, for edit and delete flows.
    pub fn parent_of<'a>(
        transactions: &'a [Transaction],
        entry: &MonthlyEntry,
    ) -> Option<&'a Transaction> {
        let id = entry.parent_id();
        transactions.iter().find(|txn| txn.has_id(id))
    }
}

fn find(transactions: &[Transaction], id: Uuid) -> ServiceResult<&Transaction> {
    transactions
        .iter()
        .find(|txn| txn.has_id(id))
        .ok_or_else(|| ServiceError::from(EngineError::TransactionNotFound(id)))
}
