//! Fiscal calendar - maps dates onto fiscal years and fiscal months.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FISCAL_YEAR_START_MONTH, FISCAL_MONTHS};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::{days_in_month, months_between};

/// A fiscal calendar defined by the calendar month in which the year starts.
///
/// Fiscal year `Y` is the twelve-month period that *ends* in calendar year `Y`.
/// With a January start this is simply calendar year `Y`; with a July start,
/// fiscal year 2025 runs from 2024-07-01 through 2025-06-30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalCalendar {
    start_month: u32,
}

impl Default for FiscalCalendar {
    fn default() -> Self {
        Self {
            start_month: DEFAULT_FISCAL_YEAR_START_MONTH,
        }
    }
}

/// Half-open date range `[start, end)` of one fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalPeriod {
    pub fiscal_year: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Half-open date range `[start, end)` of one fiscal quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalQuarter {
    pub fiscal_year: i32,
    pub quarter: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FiscalQuarter {
    /// Last day inside the quarter.
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.start)
    }
}

impl FiscalCalendar {
    pub fn new(start_month: u32) -> Result<Self> {
        if !(1..=12).contains(&start_month) {
            return Err(Error::InvalidConfigValue(format!(
                "Fiscal year start month must be between 1 and 12, got {}",
                start_month
            )));
        }
        Ok(Self { start_month })
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    /// Date range covered by `fiscal_year`.
    pub fn period(&self, fiscal_year: i32) -> FiscalPeriod {
        let start_year = if self.start_month == 1 {
            fiscal_year
        } else {
            fiscal_year - 1
        };
        // Month is validated in `new`, so day 1 of it always exists.
        let start = NaiveDate::from_ymd_opt(start_year, self.start_month, 1)
            .unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_ymd_opt(start_year + 1, self.start_month, 1)
            .unwrap_or(NaiveDate::MAX);
        FiscalPeriod {
            fiscal_year,
            start,
            end,
        }
    }

    /// Fiscal year a date belongs to.
    pub fn fiscal_year_of(&self, date: NaiveDate) -> i32 {
        if self.start_month == 1 || date.month() < self.start_month {
            date.year()
        } else {
            date.year() + 1
        }
    }

    pub fn fiscal_year_of_timestamp(&self, timestamp: NaiveDateTime) -> i32 {
        self.fiscal_year_of(timestamp.date())
    }
}

impl FiscalPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Fraction of the fiscal year that has elapsed by the end of `as_of`,
    /// clamped to `[0, 1]`.
    pub fn elapsed_fraction(&self, as_of: NaiveDate) -> f64 {
        if as_of < self.start {
            return 0.0;
        }
        if as_of >= self.end {
            return 1.0;
        }
        let elapsed = (as_of - self.start).num_days() + 1;
        (elapsed as f64 / self.total_days() as f64).clamp(0.0, 1.0)
    }

    /// Zero-based fiscal month index of `date`, if it falls inside the period.
    pub fn fiscal_month_index(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        let idx = months_between(self.start, date);
        usize::try_from(idx).ok().filter(|i| *i < FISCAL_MONTHS)
    }

    /// Bounds of fiscal quarter `quarter` (1-4) within this period.
    pub fn quarter(&self, quarter: u32) -> Result<FiscalQuarter> {
        if !(1..=4).contains(&quarter) {
            return Err(Error::Validation(ValidationError::invalid(format!(
                "Quarter must be between 1 and 4, got {}",
                quarter
            ))));
        }
        let start = self.start + Months::new((quarter - 1) * 3);
        let end = self.start + Months::new(quarter * 3);
        Ok(FiscalQuarter {
            fiscal_year: self.fiscal_year,
            quarter,
            start,
            end,
        })
    }

    /// Fraction of the days of `date`'s calendar month elapsed by the end of `date`.
    pub fn month_progress(date: NaiveDate) -> f64 {
        date.day() as f64 / days_in_month(date.year(), date.month()) as f64
    }
}
