//! Calendar windows used by the compliance checks.
//!
//! Weeks are ISO weeks starting on Monday. The bi-weekly window is the
//! week containing the date plus the week before it.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{ComplianceError, ComplianceResult};

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First date in the window.
    pub start: NaiveDate,
    /// Last date in the window.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Returns true if `date` falls within the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Returns the Monday of the ISO week containing `date`.
///
/// # Example
///
/// ```
/// use driver_compliance::compliance::week_start;
/// use chrono::NaiveDate;
///
/// // 2026-03-05 is a Thursday
/// let thursday = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
/// assert_eq!(week_start(thursday), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// ```
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Returns the Monday-to-Sunday week containing `date`.
pub fn week_window(date: NaiveDate) -> DateWindow {
    let start = week_start(date);
    DateWindow {
        start,
        end: start + Duration::days(6),
    }
}

/// Returns the previous week plus the week containing `date`.
pub fn biweekly_window(date: NaiveDate) -> DateWindow {
    let week = week_window(date);
    DateWindow {
        start: week.start - Duration::days(7),
        end: week.end,
    }
}

/// Returns the last day of the given month.
pub fn last_day_of_month(year: i32, month: u32) -> ComplianceResult<NaiveDate> {
    let invalid = || ComplianceError::InvalidPeriod { year, month };
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .ok_or_else(invalid)
}

/// Returns January 1st of `year` through the last day of `month`.
///
/// Compensatory rest accrues cumulatively within a calendar year, so every
/// month's balance is computed from the start of the year.
pub fn year_to_month_window(year: i32, month: u32) -> ComplianceResult<DateWindow> {
    let end = last_day_of_month(year, month)?;
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or(ComplianceError::InvalidPeriod { year, month })?;
    Ok(DateWindow { start, end })
}
