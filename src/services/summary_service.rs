use crate::config::EngineConfig;
use crate::domain::{CategoryLookup, Transaction};
use crate::ledger::{build_monthly_view, MonthRef, MonthlyView};
use crate::services::clock::Clock;

use super::{ServiceError, ServiceResult};

pub struct SummaryService;

impl SummaryService {
    pub fn monthly_view<L>(
        transactions: &[Transaction],
        categories: &L,
        month: MonthRef,
        config: &EngineConfig,
    ) -> ServiceResult<MonthlyView>
    where
        L: CategoryLookup + ?Sized,
    {
        build_monthly_view(transactions, month, categories, config).map_err(ServiceError::from)
    }

    /// Month picker variant taking a zero-based month index (January = 0).
    pub fn view_for<L>(
        transactions: &[Transaction],
        categories: &L,
        year: i32,
        month0: u32,
        config: &EngineConfig,
    ) -> ServiceResult<MonthlyView>
    where
        L: CategoryLookup + ?Sized,
    {
        let month = MonthRef::from_zero_based(year, month0)
            .ok_or_else(|| ServiceError::Invalid(format!("month index {} out of range", month0)))?;
        Self::monthly_view(transactions, categories, month, config)
    }

    pub fn current_month_view<L>(
        transactions: &[Transaction],
        categories: &L,
        clock: &dyn Clock,
        config: &EngineConfig,
    ) -> ServiceResult<MonthlyView>
    where
        L: CategoryLookup + ?Sized,
    {
        let month = MonthRef::of(clock.today());
        Self::monthly_view(transactions, categories, month, config)
    }
}
