use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::CategoryKind;
use crate::domain::common::{Displayable, Identifiable};
use crate::errors::{EngineError, EngineResult};
use crate::ledger::calendar::add_months;

/// Smallest number of periods an installment plan can be split into.
pub const MIN_INSTALLMENT_PERIODS: u32 = 2;

/// Rounding slack allowed per period between a stored per-period figure and the total.
const PERIOD_ROUNDING_TOLERANCE: f64 = 0.01;

/// A financial event. Installment transactions carry the total across all periods
/// in `amount`; the per-period figure is always derived.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(alias = "transaction_date")]
    pub date: NaiveDate,
    pub description: String,
    #[serde(alias = "category_id")]
    pub category_id: Uuid,
    #[serde(alias = "payment_method")]
    pub payment_method: PaymentMethod,
    #[serde(default, alias = "is_installment")]
    pub is_installment: bool,
    #[serde(default, alias = "is_recurrent")]
    pub is_recurrent: bool,
    #[serde(
        default,
        alias = "installments",
        skip_serializing_if = "Option::is_none"
    )]
    pub installment_plan: Option<InstallmentPlan>,
    /// Carried for collaborators; recurring transactions are never expanded.
    #[serde(
        default,
        alias = "recurrence_start_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurrence_start_date: Option<NaiveDate>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        date: NaiveDate,
        description: impl Into<String>,
        category_id: Uuid,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            date,
            description: description.into(),
            category_id,
            payment_method,
            is_installment: false,
            is_recurrent: false,
            installment_plan: None,
            recurrence_start_date: None,
        }
    }

    pub fn with_installments(mut self, plan: InstallmentPlan) -> Self {
        self.is_installment = true;
        self.is_recurrent = false;
        self.recurrence_start_date = None;
        self.installment_plan = Some(plan);
        self
    }

    pub fn with_recurrence(mut self, start_date: NaiveDate) -> Self {
        self.is_recurrent = true;
        self.is_installment = false;
        self.installment_plan = None;
        self.recurrence_start_date = Some(start_date);
        self
    }

    /// The plan of an installment transaction; `None` for single-shot ones.
    pub fn installments(&self) -> Option<&InstallmentPlan> {
        if self.is_installment {
            self.installment_plan.as_ref()
        } else {
            None
        }
    }

    /// Per-period amount of an installment transaction, at full precision unless
    /// the plan carries an authoritative user-entered figure.
    pub fn period_amount(&self) -> Option<f64> {
        self.installments().map(|plan| plan.period_amount(self.amount))
    }

    /// Checks the record against the engine's input contract.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(EngineError::transaction(
                self.id,
                format!("amount must be a finite, non-negative number (got {})", self.amount),
            ));
        }
        if self.is_installment && self.is_recurrent {
            return Err(EngineError::transaction(
                self.id,
                "a transaction cannot be both an installment plan and recurrent",
            ));
        }
        match (self.is_installment, &self.installment_plan) {
            (true, Some(plan)) => plan.validate(self.id, self.amount),
            (true, None) => Err(EngineError::installment(
                self.id,
                "flagged as installment but has no installment plan",
            )),
            (false, Some(_)) => Err(EngineError::installment(
                self.id,
                "carries an installment plan but is not flagged as installment",
            )),
            (false, None) => Ok(()),
        }
    }

    /// Marks every period up to `period` as paid. Never moves the paid count back.
    pub fn mark_paid_through(&mut self, period: u32) -> EngineResult<u32> {
        self.validate()?;
        let id = self.id;
        let is_installment = self.is_installment;
        let plan = match self.installment_plan.as_mut() {
            Some(plan) if is_installment => plan,
            _ => {
                return Err(EngineError::transaction(
                    id,
                    "only installment transactions have periods to mark as paid",
                ))
            }
        };
        if period > plan.total_periods {
            return Err(EngineError::installment(
                id,
                format!(
                    "cannot mark period {} as paid on a plan of {} periods",
                    period, plan.total_periods
                ),
            ));
        }
        plan.paid_periods = plan.paid_periods.max(period);
        Ok(plan.paid_periods)
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        match self.installments() {
            Some(plan) => format!(
                "{} [{} {}/{}]",
                self.description, self.kind, plan.paid_periods, plan.total_periods
            ),
            None => format!("{} [{}]", self.description, self.kind),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Revenue,
    Expense,
}

impl From<TransactionKind> for CategoryKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Revenue => CategoryKind::Revenue,
            TransactionKind::Expense => CategoryKind::Expense,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionKind::Revenue => "revenue",
            TransactionKind::Expense => "expense",
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[serde(alias = "Dinheiro")]
    Cash,
    #[default]
    #[serde(alias = "Débito")]
    Debit,
    #[serde(alias = "Crédito")]
    Credit,
    /// Payment booklet ("carnê").
    #[serde(alias = "Carnê")]
    Booklet,
    #[serde(alias = "Boleto")]
    BankSlip,
    #[serde(alias = "Transferência")]
    Transfer,
    #[serde(alias = "Financiamento")]
    Financing,
    #[serde(alias = "Empréstimo")]
    Loan,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Debit => "Debit",
            PaymentMethod::Credit => "Credit",
            PaymentMethod::Booklet => "Booklet",
            PaymentMethod::BankSlip => "Bank slip",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Financing => "Financing",
            PaymentMethod::Loan => "Loan",
        };
        f.write_str(label)
    }
}

/// Schedule of a multi-period purchase: `total_periods` monthly payments from
/// `start_date`, of which the first `paid_periods` are settled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentPlan {
    #[serde(alias = "totalInstallments", alias = "total_installments")]
    pub total_periods: u32,
    #[serde(alias = "paidInstallments", alias = "paid_installments")]
    pub paid_periods: u32,
    #[serde(alias = "start_date")]
    pub start_date: NaiveDate,
    /// Pre-rounded per-period figure entered by the user. Authoritative when set.
    #[serde(
        default,
        alias = "installmentAmount",
        skip_serializing_if = "Option::is_none"
    )]
    pub period_amount: Option<f64>,
}

impl InstallmentPlan {
    pub fn new(total_periods: u32, start_date: NaiveDate) -> Self {
        Self {
            total_periods,
            paid_periods: 0,
            start_date,
            period_amount: None,
        }
    }

    pub fn with_paid(mut self, paid_periods: u32) -> Self {
        self.paid_periods = paid_periods;
        self
    }

    pub fn with_period_amount(mut self, period_amount: f64) -> Self {
        self.period_amount = Some(period_amount);
        self
    }

    /// Checks the schedule against the transaction total it splits.
    pub fn validate(&self, id: Uuid, total_amount: f64) -> EngineResult<()> {
        if self.total_periods < MIN_INSTALLMENT_PERIODS {
            return Err(EngineError::installment(
                id,
                format!(
                    "total periods must be at least {} (got {})",
                    MIN_INSTALLMENT_PERIODS, self.total_periods
                ),
            ));
        }
        if self.paid_periods > self.total_periods {
            return Err(EngineError::installment(
                id,
                format!(
                    "paid periods ({}) exceed total periods ({})",
                    self.paid_periods, self.total_periods
                ),
            ));
        }
        if let Some(amount) = self.period_amount {
            if !amount.is_finite() || amount <= 0.0 {
                return Err(EngineError::installment(
                    id,
                    format!("per-period amount must be positive (got {})", amount),
                ));
            }
            let periods = f64::from(self.total_periods);
            let drift = (amount * periods - total_amount).abs();
            if drift > PERIOD_ROUNDING_TOLERANCE * periods + f64::EPSILON * total_amount.abs() {
                return Err(EngineError::installment(
                    id,
                    format!(
                        "{} periods of {} do not add up to the total of {}",
                        self.total_periods, amount, total_amount
                    ),
                ));
            }
        }
        if self.end_date().is_none() {
            return Err(EngineError::installment(
                id,
                "schedule runs past the supported calendar range",
            ));
        }
        Ok(())
    }

    pub fn period_amount(&self, total_amount: f64) -> f64 {
        self.period_amount
            .unwrap_or(total_amount / f64::from(self.total_periods))
    }

    pub fn pending_periods(&self) -> u32 {
        self.total_periods.saturating_sub(self.paid_periods)
    }

    pub fn is_completed(&self) -> bool {
        self.paid_periods >= self.total_periods
    }

    /// Due date of the 1-based `period`.
    pub fn due_date(&self, period: u32) -> Option<NaiveDate> {
        add_months(self.start_date, period.checked_sub(1)?)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.due_date(self.total_periods)
    }

    /// Due date of the first unpaid period; `None` once the plan is completed.
    pub fn next_due_date(&self) -> Option<NaiveDate> {
        if self.is_completed() {
            return None;
        }
        add_months(self.start_date, self.paid_periods)
    }
}
