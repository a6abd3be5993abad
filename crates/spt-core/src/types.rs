//! Core type definitions with validation.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The tax year (or one of its prior years) has no calendar representation.
    #[error("tax year {year} is out of range")]
    TaxYearOutOfRange { year: i32 },

    /// A day count exceeds the length of its year window.
    #[error("{field}: Days must be between 0 and {max}")]
    DaysOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
}

/// A calendar year for which the Substantial Presence Test is evaluated.
///
/// The year defines three windows: the current year and the two years
/// preceding it. All three are guaranteed to be representable as
/// [`NaiveDate`] ranges once a `TaxYear` has been constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct TaxYear(i32);

impl TaxYear {
    /// Creates a tax year after checking that all three windows exist.
    pub fn new(year: i32) -> Result<Self, ValidationError> {
        let second_prior = year
            .checked_sub(2)
            .ok_or(ValidationError::TaxYearOutOfRange { year })?;
        if NaiveDate::from_ymd_opt(second_prior, 1, 1).is_none()
            || NaiveDate::from_ymd_opt(year, 12, 31).is_none()
        {
            return Err(ValidationError::TaxYearOutOfRange { year });
        }
        Ok(Self(year))
    }

    /// The default year to evaluate: the calendar year before `today`.
    pub fn default_for(today: NaiveDate) -> Result<Self, ValidationError> {
        Self::new(today.year() - 1)
    }

    /// Returns the year as an integer.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Gregorian leap-year rule.
    #[must_use]
    pub const fn is_leap(year: i32) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    /// Number of days in `year` (365 or 366).
    #[must_use]
    pub const fn days_in_year(year: i32) -> u32 {
        if Self::is_leap(year) { 366 } else { 365 }
    }

    /// The current-year window.
    pub fn current(self) -> YearWindow {
        YearWindow::for_year(self.0)
    }

    /// The window one year before the tax year.
    pub fn first_prior(self) -> YearWindow {
        YearWindow::for_year(self.0 - 1)
    }

    /// The window two years before the tax year.
    pub fn second_prior(self) -> YearWindow {
        YearWindow::for_year(self.0 - 2)
    }

    /// All three windows, current year first.
    pub fn windows(self) -> [YearWindow; 3] {
        [self.current(), self.first_prior(), self.second_prior()]
    }
}

impl fmt::Display for TaxYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for TaxYear {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaxYear> for i32 {
    fn from(year: TaxYear) -> Self {
        year.0
    }
}

/// One calendar year, `[Jan 1, Dec 31]` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub year: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl YearWindow {
    /// Only called for years validated by [`TaxYear::new`].
    fn for_year(year: i32) -> Self {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX);
        Self { year, start, end }
    }

    /// Number of days in the window.
    #[must_use]
    pub const fn day_count(&self) -> u32 {
        TaxYear::days_in_year(self.year)
    }

    /// Clips the inclusive range `[start, end]` to this window.
    ///
    /// Returns `None` when the range ends before the window opens or starts
    /// after it closes.
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        if end < self.start || start > self.end {
            return None;
        }
        Some((start.max(self.start), end.min(self.end)))
    }
}

/// Days physically present in each of the three year windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCounts {
    pub current_year_days: u32,
    pub first_prior_year_days: u32,
    pub second_prior_year_days: u32,
}

impl DayCounts {
    /// Creates day counts in current, first-prior, second-prior order.
    pub const fn new(current: u32, first_prior: u32, second_prior: u32) -> Self {
        Self {
            current_year_days: current,
            first_prior_year_days: first_prior,
            second_prior_year_days: second_prior,
        }
    }

    /// Checks each count against the length of its window.
    ///
    /// Manually entered counts go through this before evaluation; counts
    /// produced by the reconciler are bounded by construction.
    pub fn validate_for(&self, tax_year: TaxYear) -> Result<(), ValidationError> {
        let checks = [
            ("currentYearDays", self.current_year_days, tax_year.current()),
            ("firstPriorYearDays", self.first_prior_year_days, tax_year.first_prior()),
            ("secondPriorYearDays", self.second_prior_year_days, tax_year.second_prior()),
        ];
        for (field, value, window) in checks {
            if value > window.day_count() {
                return Err(ValidationError::DaysOutOfRange {
                    field,
                    value,
                    max: window.day_count(),
                });
            }
        }
        Ok(())
    }
}
