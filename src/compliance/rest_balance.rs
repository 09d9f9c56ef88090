//! Compensatory rest accounting under the collective agreement.
//!
//! A driver earns two rest days for every seven days worked, plus one for
//! each Sunday and each national holiday worked. Entitlement accrues from
//! January 1st, so the balance for a month always covers the year to date.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ComplianceResult;
use crate::models::{DayRecord, DayType};
use crate::store::{DayRecordStore, HolidayRegistry};

use super::dates::year_to_month_window;

/// Worked days per block that earns rest days.
pub const WORKED_DAYS_PER_BLOCK: u32 = 7;

/// Rest days earned per completed block.
pub const RESTS_PER_BLOCK: u32 = 2;

/// A driver's compensatory rest position for a period.
///
/// Every component of the entitlement formula is returned so it can be
/// displayed and audited, not just the final figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestBalance {
    /// The driver.
    pub driver_id: String,
    /// The requested year.
    pub year: i32,
    /// The requested month.
    pub month: u32,
    /// First day counted (January 1st).
    pub period_start: NaiveDate,
    /// Last day counted (end of the month).
    pub period_end: NaiveDate,
    /// Work and training days.
    pub agreement_worked_days: u32,
    /// Work days only.
    pub tachograph_worked_days: u32,
    /// Completed blocks of seven agreement worked days.
    pub completed_blocks: u32,
    /// Rest days earned from completed blocks.
    pub rests_from_worked_days: u32,
    /// Sundays worked.
    pub sundays_worked: u32,
    /// National holidays worked.
    pub holidays_worked: u32,
    /// Total rest days owed.
    pub rests_owed: u32,
    /// Weekly rest days taken.
    pub rests_taken: u32,
    /// Rest days still owed.
    pub pending: u32,
    /// Records in the period, vacation excluded.
    pub total_records: u32,
    /// Vacation records in the period.
    pub vacation_days: u32,
    /// Rest days taken as a percentage of `total_records`, one decimal.
    pub rest_percentage: Decimal,
}

#[derive(Default)]
struct Tally {
    agreement_worked_days: u32,
    tachograph_worked_days: u32,
    sundays_worked: u32,
    holidays_worked: u32,
    rests_taken: u32,
    total_records: u32,
    vacation_days: u32,
}

impl Tally {
    fn record(&mut self, record: &DayRecord, holidays: &dyn HolidayRegistry) {
        if record.day_type == DayType::Vacation {
            self.vacation_days += 1;
            return;
        }
        self.total_records += 1;

        match record.day_type {
            DayType::Work | DayType::Training => {
                self.agreement_worked_days += 1;
                if record.day_type == DayType::Work {
                    self.tachograph_worked_days += 1;
                }
                if record.is_sunday() {
                    self.sundays_worked += 1;
                }
                if holidays.is_national_holiday(record.date) {
                    self.holidays_worked += 1;
                }
            }
            DayType::RestNormal | DayType::RestReduced => self.rests_taken += 1,
            DayType::Holiday | DayType::SickLeave | DayType::Inactive | DayType::Vacation => {}
        }
    }
}

/// Computes the balance from already-fetched records of the period.
pub fn tally_rest_balance(
    driver_id: &str,
    year: i32,
    month: u32,
    records: &[DayRecord],
    holidays: &dyn HolidayRegistry,
) -> ComplianceResult<RestBalance> {
    let window = year_to_month_window(year, month)?;

    let mut tally = Tally::default();
    for record in records.iter().filter(|r| window.contains(r.date)) {
        tally.record(record, holidays);
    }

    let completed_blocks = tally.agreement_worked_days / WORKED_DAYS_PER_BLOCK;
    let rests_from_worked_days = completed_blocks * RESTS_PER_BLOCK;
    let rests_owed = rests_from_worked_days + tally.sundays_worked + tally.holidays_worked;
    let pending = rests_owed.saturating_sub(tally.rests_taken);

    let rest_percentage = if tally.total_records == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(tally.rests_taken) * Decimal::ONE_HUNDRED
            / Decimal::from(tally.total_records))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    };

    Ok(RestBalance {
        driver_id: driver_id.to_string(),
        year,
        month,
        period_start: window.start,
        period_end: window.end,
        agreement_worked_days: tally.agreement_worked_days,
        tachograph_worked_days: tally.tachograph_worked_days,
        completed_blocks,
        rests_from_worked_days,
        sundays_worked: tally.sundays_worked,
        holidays_worked: tally.holidays_worked,
        rests_owed,
        rests_taken: tally.rests_taken,
        pending,
        total_records: tally.total_records,
        vacation_days: tally.vacation_days,
        rest_percentage,
    })
}

/// Computes a driver's year-to-date rest balance up to the end of `month`.
///
/// Fails with [`InvalidPeriod`](crate::error::ComplianceError::InvalidPeriod)
/// for a month outside 1-12; store failures are returned unchanged.
pub fn compute_rest_balance(
    store: &dyn DayRecordStore,
    holidays: &dyn HolidayRegistry,
    driver_id: &str,
    year: i32,
    month: u32,
) -> ComplianceResult<RestBalance> {
    let window = year_to_month_window(year, month)?;
    let records = store.find_records_in_range(driver_id, window.start, window.end)?;
    let balance = tally_rest_balance(driver_id, year, month, &records, holidays)?;

    debug!(
        driver_id,
        year,
        month,
        rests_owed = balance.rests_owed,
        rests_taken = balance.rests_taken,
        pending = balance.pending,
        "Computed rest balance"
    );
    Ok(balance)
}
