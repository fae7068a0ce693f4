use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Advances `date` by whole calendar months, clamping the day to the end of
/// shorter months (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    shift_month(date, i64::from(months))
}

pub(crate) fn shift_month(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let index = i64::from(date.year()) * 12 + i64::from(date.month0()) + months;
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_next.pred_opt().map(|last| last.day())
}

/// A calendar month, used to scope monthly views. The month is 1-based and
/// always in `1..=12`, including after deserialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "RawMonthRef")]
pub struct MonthRef {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawMonthRef {
    year: i32,
    month: u32,
}

impl TryFrom<RawMonthRef> for MonthRef {
    type Error = EngineError;

    fn try_from(raw: RawMonthRef) -> Result<Self, Self::Error> {
        MonthRef::new(raw.year, raw.month).ok_or(EngineError::InvalidMonth {
            year: raw.year,
            month: raw.month,
        })
    }
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Builds a month from a zero-based month index (January = 0).
    pub fn from_zero_based(year: i32, month0: u32) -> Option<Self> {
        Self::new(year, month0.checked_add(1)?)
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn month0(&self) -> u32 {
        self.month.saturating_sub(1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, days_in_month(self.year, self.month)?)
    }

    /// Moves forwards (positive) or backwards (negative) by whole months.
    pub fn shift(&self, months: i32) -> Option<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month0()) + i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        Some(Self {
            year,
            month: index.rem_euclid(12) as u32 + 1,
        })
    }

    pub fn next(&self) -> Option<Self> {
        self.shift(1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.shift(-1)
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
