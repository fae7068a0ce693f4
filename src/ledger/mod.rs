//! The amortization engine: installment expansion, plan classification and
//! month-scoped views. Every function here is pure over its arguments.

pub mod calendar;
pub mod installments;
pub mod monthly;
pub mod plans;

pub use calendar::{add_months, MonthRef};
pub use installments::{
    expand_all, expand_installments, InstallmentStatus, VirtualInstallmentEntry,
};
pub use monthly::{build_monthly_view, MonthlyEntry, MonthlySummary, MonthlyView};
pub use plans::{classify_plan, plan_catalog, InstallmentPlanSummary, PlanStatus};
