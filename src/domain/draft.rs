//! Editable transaction state backing the create/edit form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::transaction::{
    InstallmentPlan, PaymentMethod, Transaction, TransactionKind, MIN_INSTALLMENT_PERIODS,
};
use crate::errors::{EngineError, EngineResult};
use crate::utils::round_currency;

/// Work-in-progress transaction. Keeps the installment and recurrence toggles
/// mutually exclusive and derives the plan total from the per-period amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub id: Option<Uuid>,
    kind: TransactionKind,
    pub amount: Option<f64>,
    pub date: NaiveDate,
    pub description: String,
    pub category_id: Option<Uuid>,
    pub payment_method: PaymentMethod,
    is_installment: bool,
    is_recurrent: bool,
    #[serde(default)]
    recurrence_start_date: Option<NaiveDate>,
    pub start_date: NaiveDate,
    total_periods: u32,
    period_amount: Option<f64>,
    #[serde(default)]
    period_amount_entered: bool,
    paid_periods: u32,
}

impl TransactionDraft {
    /// Blank expense draft dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            id: None,
            kind: TransactionKind::Expense,
            amount: None,
            date: today,
            description: String::new(),
            category_id: None,
            payment_method: PaymentMethod::Debit,
            is_installment: false,
            is_recurrent: false,
            recurrence_start_date: None,
            start_date: today,
            total_periods: MIN_INSTALLMENT_PERIODS,
            period_amount: None,
            period_amount_entered: false,
            paid_periods: 0,
        }
    }

    /// Pre-fills a draft for editing an existing transaction.
    pub fn from_transaction(txn: &Transaction, today: NaiveDate) -> Self {
        let mut draft = Self::new(today);
        draft.id = Some(txn.id);
        draft.kind = txn.kind;
        draft.amount = Some(txn.amount);
        draft.date = txn.date;
        draft.description = txn.description.clone();
        draft.category_id = Some(txn.category_id);
        draft.payment_method = txn.payment_method;
        draft.is_recurrent = txn.is_recurrent;
        draft.recurrence_start_date = txn.recurrence_start_date;
        if let Some(plan) = txn.installments() {
            draft.is_installment = true;
            draft.start_date = plan.start_date;
            draft.total_periods = plan.total_periods;
            draft.paid_periods = plan.paid_periods;
            draft.period_amount_entered = plan.period_amount.is_some();
            draft.period_amount = Some(plan.period_amount.unwrap_or_else(|| {
                round_currency(txn.amount / f64::from(plan.total_periods.max(1)))
            }));
        }
        draft
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn is_installment(&self) -> bool {
        self.is_installment
    }

    pub fn is_recurrent(&self) -> bool {
        self.is_recurrent
    }

    /// Start of the recurrence; the transaction date stands in until one is stored.
    pub fn recurrence_start_date(&self) -> Option<NaiveDate> {
        self.recurrence_start_date
    }

    pub fn total_periods(&self) -> u32 {
        self.total_periods
    }

    pub fn period_amount(&self) -> Option<f64> {
        self.period_amount
    }

    /// Switching kind resets the category; revenue cannot be split or recurring.
    pub fn set_kind(&mut self, kind: TransactionKind) {
        self.kind = kind;
        self.category_id = None;
        match kind {
            TransactionKind::Revenue => {
                self.is_installment = false;
                self.is_recurrent = false;
                self.period_amount = None;
                self.period_amount_entered = false;
                self.payment_method = PaymentMethod::Transfer;
            }
            TransactionKind::Expense => self.payment_method = PaymentMethod::Debit,
        }
    }

    pub fn set_installment(&mut self, enabled: bool) {
        if enabled && self.kind == TransactionKind::Revenue {
            return;
        }
        self.is_installment = enabled;
        if enabled {
            self.is_recurrent = false;
            self.sync_total();
        } else {
            self.period_amount = None;
            self.period_amount_entered = false;
        }
    }

    pub fn set_recurrent(&mut self, enabled: bool) {
        if enabled && self.kind == TransactionKind::Revenue {
            return;
        }
        self.is_recurrent = enabled;
        if enabled {
            self.is_installment = false;
            self.period_amount = None;
            self.period_amount_entered = false;
        }
    }

    pub fn set_total_periods(&mut self, total_periods: u32) {
        self.total_periods = total_periods;
        self.sync_total();
    }

    /// A figure typed by the user becomes authoritative for the plan.
    pub fn set_period_amount(&mut self, period_amount: Option<f64>) {
        self.period_amount = period_amount;
        self.period_amount_entered = period_amount.is_some();
        self.sync_total();
    }

    fn sync_total(&mut self) {
        if !self.is_installment {
            return;
        }
        if let Some(per_period) = self.period_amount {
            if self.total_periods > 0 && per_period > 0.0 {
                self.amount = Some(round_currency(per_period * f64::from(self.total_periods)));
            }
        }
    }

    /// Produces a validated transaction. New drafts receive a fresh identifier.
    pub fn build(&self) -> EngineResult<Transaction> {
        let id = self.id.unwrap_or_else(Uuid::new_v4);
        let amount = self
            .amount
            .filter(|amount| *amount > 0.0)
            .ok_or_else(|| EngineError::transaction(id, "amount is required"))?;
        let category_id = self
            .category_id
            .ok_or_else(|| EngineError::transaction(id, "category is required"))?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err(EngineError::transaction(id, "description is required"));
        }

        let mut txn = Transaction::new(
            self.kind,
            amount,
            self.date,
            description,
            category_id,
            self.payment_method,
        );
        txn.id = id;
        if self.is_installment {
            let mut plan = InstallmentPlan::new(self.total_periods, self.start_date)
                .with_paid(self.paid_periods);
            if self.period_amount_entered {
                plan.period_amount = self.period_amount;
            }
            txn = txn.with_installments(plan);
        } else if self.is_recurrent {
            txn = txn.with_recurrence(self.recurrence_start_date.unwrap_or(self.date));
        }
        txn.validate()?;
        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filled_draft() -> TransactionDraft {
        let mut draft = TransactionDraft::new(date(2024, 7, 1));
        draft.description = "Laptop".into();
        draft.category_id = Some(Uuid::new_v4());
        draft
    }

    #[test]
    fn total_follows_rounded_period_amount() {
        let mut draft = filled_draft();
        draft.set_installment(true);
        draft.set_total_periods(3);
        draft.set_period_amount(Some(333.33));
        assert_eq!(draft.amount, Some(999.99));

        let txn = draft.build().expect("valid installment draft");
        assert_eq!(txn.amount, 999.99);
        assert_eq!(txn.period_amount(), Some(333.33));
        assert_eq!(txn.installments().unwrap().total_periods, 3);
    }

    #[test]
    fn toggles_are_mutually_exclusive() {
        let mut draft = filled_draft();
        draft.set_installment(true);
        draft.set_recurrent(true);
        assert!(draft.is_recurrent());
        assert!(!draft.is_installment());

        draft.set_installment(true);
        assert!(draft.is_installment());
        assert!(!draft.is_recurrent());
    }

    #[test]
    fn switching_to_revenue_clears_schedule_and_category() {
        let mut draft = filled_draft();
        draft.set_installment(true);
        draft.set_kind(TransactionKind::Revenue);
        assert!(!draft.is_installment());
        assert!(draft.category_id.is_none());
        assert_eq!(draft.payment_method, PaymentMethod::Transfer);

        draft.set_installment(true);
        assert!(!draft.is_installment());

        draft.set_kind(TransactionKind::Expense);
        assert_eq!(draft.payment_method, PaymentMethod::Debit);
    }

    #[test]
    fn build_requires_mandatory_fields() {
        let mut draft = filled_draft();
        let err = draft.build().expect_err("missing amount");
        assert!(err.to_string().contains("amount"), "unexpected error: {err}");

        draft.amount = Some(10.0);
        draft.description = "   ".into();
        let err = draft.build().expect_err("blank description");
        assert!(err.to_string().contains("description"), "unexpected error: {err}");

        draft.description = "Coffee".into();
        draft.category_id = None;
        let err = draft.build().expect_err("missing category");
        assert!(err.to_string().contains("category"), "unexpected error: {err}");
    }

    #[test]
    fn build_rejects_single_period_plans() {
        let mut draft = filled_draft();
        draft.amount = Some(100.0);
        draft.set_installment(true);
        draft.set_total_periods(1);
        assert!(matches!(
            draft.build(),
            Err(EngineError::InvalidInstallment { .. })
        ));
    }

    #[test]
    fn editing_keeps_the_recurrence_start() {
        let txn = Transaction::new(
            TransactionKind::Expense,
            1500.0,
            date(2024, 7, 10),
            "Rent",
            Uuid::new_v4(),
            PaymentMethod::BankSlip,
        )
        .with_recurrence(date(2023, 1, 10));

        let mut draft = TransactionDraft::from_transaction(&txn, date(2024, 7, 20));
        assert_eq!(draft.recurrence_start_date(), Some(date(2023, 1, 10)));
        draft.date = date(2024, 8, 10);
        let rebuilt = draft.build().expect("rebuild");
        assert!(rebuilt.is_recurrent);
        assert_eq!(rebuilt.date, date(2024, 8, 10));
        assert_eq!(rebuilt.recurrence_start_date, Some(date(2023, 1, 10)));

        let mut fresh = filled_draft();
        fresh.amount = Some(40.0);
        fresh.set_recurrent(true);
        let built = fresh.build().expect("new recurring draft");
        assert_eq!(built.recurrence_start_date, Some(fresh.date));
    }

    #[test]
    fn editing_prefills_rounded_period_amount() {
        let txn = Transaction::new(
            TransactionKind::Expense,
            1000.0,
            date(2024, 1, 10),
            "Sofa",
            Uuid::new_v4(),
            PaymentMethod::Credit,
        )
        .with_installments(InstallmentPlan::new(3, date(2024, 2, 1)).with_paid(1));

        let draft = TransactionDraft::from_transaction(&txn, date(2024, 7, 1));
        assert_eq!(draft.id, Some(txn.id));
        assert_eq!(draft.period_amount(), Some(333.33));
        assert_eq!(draft.start_date, date(2024, 2, 1));

        // Untouched edits keep the stored total and paid count.
        let rebuilt = draft.build().expect("rebuild");
        assert_eq!(rebuilt.id, txn.id);
        assert_eq!(rebuilt.amount, 1000.0);
        assert_eq!(rebuilt.installments().unwrap().paid_periods, 1);
    }
}
