//! Rolling-window aggregation of driving time.
//!
//! Window sums are never stored. They are recomputed from the raw day
//! records on every call, with the proposed day substituted for whatever is
//! stored on its date so an update is never counted twice.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ComplianceResult;
use crate::models::{DayProposal, DayRecord, DayType};
use crate::store::DayRecordStore;

use super::dates::{biweekly_window, week_window};

/// Daily driving baseline in hours. Days above it use one of the weekly
/// extensions.
pub const DAILY_DRIVING_LIMIT: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// Driving and work aggregates for the week containing a proposed day.
///
/// # Example
///
/// ```
/// use driver_compliance::compliance::summarize_window;
/// use driver_compliance::models::DayProposal;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let proposal = DayProposal::new(
///     NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
///     Decimal::new(95, 1),
///     Decimal::new(11, 0),
/// );
/// let stats = summarize_window(&[], &proposal);
/// assert_eq!(stats.weekly_driving, Decimal::new(95, 1));
/// assert_eq!(stats.days_worked_this_week, 1);
/// assert_eq!(stats.extensions_this_week, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStats {
    /// Monday of the week containing the proposed date.
    pub week_start: NaiveDate,
    /// Sunday of the week containing the proposed date.
    pub week_end: NaiveDate,
    /// Driving hours in the week, proposed day included.
    pub weekly_driving: Decimal,
    /// Driving hours over the previous and current week, proposed day included.
    pub biweekly_driving: Decimal,
    /// Work days in the week, proposed day included if it has working hours.
    pub days_worked_this_week: u32,
    /// Days in the week driving over the daily baseline, proposed day included.
    pub extensions_this_week: u32,
}

/// Computes window aggregates from already-fetched records.
///
/// `records` should cover at least the bi-weekly window of the proposal;
/// records outside it are ignored, as is any record on the proposed date.
pub fn summarize_window(records: &[DayRecord], proposal: &DayProposal) -> WindowStats {
    let week = week_window(proposal.date);
    let biweek = biweekly_window(proposal.date);

    let biweek_records: Vec<&DayRecord> = records
        .iter()
        .filter(|r| r.date != proposal.date && biweek.contains(r.date))
        .collect();
    let week_records: Vec<&DayRecord> = biweek_records
        .iter()
        .copied()
        .filter(|r| week.contains(r.date))
        .collect();

    let weekly_driving: Decimal = week_records
        .iter()
        .map(|r| r.driving_hours)
        .sum::<Decimal>()
        + proposal.driving_hours;
    let biweekly_driving: Decimal = biweek_records
        .iter()
        .map(|r| r.driving_hours)
        .sum::<Decimal>()
        + proposal.driving_hours;

    let stored_work_days = week_records
        .iter()
        .filter(|r| r.day_type == DayType::Work)
        .count() as u32;
    let days_worked_this_week =
        stored_work_days + u32::from(proposal.working_hours > Decimal::ZERO);

    let stored_extensions = week_records
        .iter()
        .filter(|r| r.driving_hours > DAILY_DRIVING_LIMIT)
        .count() as u32;
    let extensions_this_week =
        stored_extensions + u32::from(proposal.driving_hours > DAILY_DRIVING_LIMIT);

    WindowStats {
        week_start: week.start,
        week_end: week.end,
        weekly_driving,
        biweekly_driving,
        days_worked_this_week,
        extensions_this_week,
    }
}

/// Reads the driver's bi-weekly window and aggregates it around `proposal`.
///
/// Store failures are returned unchanged.
pub fn aggregate_window(
    store: &dyn DayRecordStore,
    driver_id: &str,
    proposal: &DayProposal,
) -> ComplianceResult<WindowStats> {
    let biweek = biweekly_window(proposal.date);
    let records = store.find_records_in_range(driver_id, biweek.start, biweek.end)?;
    let stats = summarize_window(&records, proposal);

    debug!(
        driver_id,
        date = %proposal.date,
        weekly_driving = %stats.weekly_driving,
        biweekly_driving = %stats.biweekly_driving,
        days_worked = stats.days_worked_this_week,
        extensions = stats.extensions_this_week,
        "Aggregated driving window"
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryDayStore;
    use std::str::FromStr;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn work(date: &str, driving: &str) -> DayRecord {
        DayRecord::new("drv_001", make_date(date), DayType::Work).with_hours(dec(driving), dec("10"))
    }

    // ==========================================================================
    // Existing record on the proposed date is replaced, not added
    // ==========================================================================
    #[test]
    fn test_proposed_day_replaces_existing_record() {
        let records = vec![work("2026-03-04", "5")];
        let proposal = DayProposal::new(make_date("2026-03-04"), dec("7"), dec("9"));

        let stats = summarize_window(&records, &proposal);
        assert_eq!(stats.weekly_driving, dec("7"));
        assert_eq!(stats.biweekly_driving, dec("7"));
        assert_eq!(stats.days_worked_this_week, 1);
    }

    #[test]
    fn test_weekly_sum_only_counts_current_week() {
        // Week of 2026-03-02 (Mon) .. 2026-03-08 (Sun)
        let records = vec![
            work("2026-02-27", "8"), // previous week
            work("2026-03-02", "8"),
            work("2026-03-03", "6"),
            work("2026-03-09", "8"), // following week
        ];
        let proposal = DayProposal::new(make_date("2026-03-04"), dec("4.5"), dec("6"));

        let stats = summarize_window(&records, &proposal);
        assert_eq!(stats.week_start, make_date("2026-03-02"));
        assert_eq!(stats.week_end, make_date("2026-03-08"));
        assert_eq!(stats.weekly_driving, dec("18.5"));
        assert_eq!(stats.biweekly_driving, dec("26.5"));
        assert_eq!(stats.days_worked_this_week, 3);
    }

    #[test]
    fn test_biweekly_excludes_two_weeks_back() {
        let records = vec![work("2026-02-22", "9"), work("2026-02-23", "9")];
        let proposal = DayProposal::new(make_date("2026-03-02"), dec("1"), dec("1"));

        let stats = summarize_window(&records, &proposal);
        assert_eq!(stats.biweekly_driving, dec("10"));
        assert_eq!(stats.weekly_driving, dec("1"));
    }

    #[test]
    fn test_only_work_days_count_as_worked() {
        let records = vec![
            DayRecord::new("drv_001", make_date("2026-03-02"), DayType::Training)
                .with_hours(Decimal::ZERO, dec("8")),
            DayRecord::new("drv_001", make_date("2026-03-03"), DayType::Vacation),
            work("2026-03-05", "6"),
        ];
        let proposal = DayProposal::new(make_date("2026-03-04"), dec("6"), dec("8"));

        let stats = summarize_window(&records, &proposal);
        assert_eq!(stats.days_worked_this_week, 2);
    }

    #[test]
    fn test_proposal_without_working_hours_is_not_a_worked_day() {
        let records = vec![work("2026-03-02", "8")];
        let proposal = DayProposal::new(make_date("2026-03-04"), Decimal::ZERO, Decimal::ZERO);

        let stats = summarize_window(&records, &proposal);
        assert_eq!(stats.days_worked_this_week, 1);
    }

    #[test]
    fn test_extensions_count_strictly_above_nine() {
        let records = vec![
            work("2026-03-02", "9"),
            work("2026-03-03", "9.25"),
            work("2026-03-04", "10"),
        ];
        let proposal = DayProposal::new(make_date("2026-03-05"), dec("9.5"), dec("11"));

        let stats = summarize_window(&records, &proposal);
        assert_eq!(stats.extensions_this_week, 3);
    }

    #[test]
    fn test_replaced_extension_is_not_counted() {
        let records = vec![work("2026-03-02", "10"), work("2026-03-03", "10")];
        let proposal = DayProposal::new(make_date("2026-03-03"), dec("8"), dec("9"));

        let stats = summarize_window(&records, &proposal);
        assert_eq!(stats.extensions_this_week, 1);
    }

    #[test]
    fn test_aggregate_window_reads_store() {
        let store = InMemoryDayStore::with_records(vec![
            work("2026-02-24", "9"),
            work("2026-03-02", "8"),
        ]);
        let proposal = DayProposal::new(make_date("2026-03-03"), dec("8"), dec("9"));

        let stats = aggregate_window(&store, "drv_001", &proposal).unwrap();
        assert_eq!(stats.weekly_driving, dec("16"));
        assert_eq!(stats.biweekly_driving, dec("25"));
    }

    #[test]
    fn test_stats_serialization() {
        let proposal = DayProposal::new(make_date("2026-03-03"), dec("8"), dec("9"));
        let stats = summarize_window(&[], &proposal);

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"weekly_driving\":\"8\""));
        assert!(json.contains("\"week_start\":\"2026-03-02\""));
    }
}
