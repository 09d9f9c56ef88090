//! Consecutive work streak analysis.
//!
//! A weekly rest is due at the latest after six consecutive working days.
//! This module measures the current streak from a driver's most recent
//! record and works out whether the next weekly rest must be the regular
//! 45 h kind, since two reduced rests may not follow each other.

use std::ops::ControlFlow;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ComplianceResult;
use crate::models::{Alert, AlertCode, DayRecord, RestKind, RestRequirement, WeeklyRest};
use crate::store::DayRecordStore;

/// Maximum consecutive working days before a weekly rest is due.
pub const MAX_CONSECUTIVE_WORK_DAYS: u32 = 6;

/// Days of history read before the as-of date.
pub const STREAK_LOOKBACK_DAYS: i64 = 60;

/// Days of advance entries read after the as-of date.
pub const STREAK_LOOKAHEAD_DAYS: i64 = 30;

/// Streak length from which a required 45 h rest is flagged.
const REGULAR_REST_NOTICE_DAYS: u32 = 4;

/// How close a driver is to needing a weekly rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// More than one working day left.
    Normal,
    /// One working day left.
    Warning,
    /// Rest must start tomorrow, or there is no history to go by.
    Urgent,
    /// The six-day limit is already exceeded.
    Violation,
}

/// The state of a driver's consecutive work streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakReport {
    /// The driver analysed.
    pub driver_id: String,
    /// The date the history window was centred on.
    pub as_of: NaiveDate,
    /// The most recent record the streak was measured from.
    pub latest_record_date: Option<NaiveDate>,
    /// Consecutive worked days ending at the latest record.
    pub consecutive_days: u32,
    /// Working days left before the weekly rest is mandatory.
    pub days_until_mandatory_rest: u32,
    /// The latest date the next weekly rest can start.
    pub next_mandatory_rest_date: Option<NaiveDate>,
    /// Which kind of weekly rest must come next.
    pub next_rest_required: RestRequirement,
    /// The most recent weekly rest found.
    pub last_weekly_rest: Option<WeeklyRest>,
    /// The weekly rest before that one.
    pub previous_weekly_rest: Option<WeeklyRest>,
    /// Overall urgency.
    pub urgency: Urgency,
    /// Alerts raised by the streak thresholds.
    pub alerts: Vec<Alert>,
}

/// What one record does to the streak walk.
enum StreakStep {
    Counts,
    WeeklyRest,
    Neutral,
}

fn classify(record: &DayRecord) -> StreakStep {
    if record.day_type.is_worked() {
        StreakStep::Counts
    } else if record.day_type.rest_kind().is_some() {
        StreakStep::WeeklyRest
    } else {
        StreakStep::Neutral
    }
}

/// Counts consecutive worked days, walking back from the first record.
///
/// `records` must be sorted by date descending. Each record must fall on
/// the expected date, one day before the last counted day; any gap ends the
/// walk. Worked days count and move the expected date back, a weekly rest
/// ends the walk, and a neutral absence (vacation, sick leave, holiday,
/// inactive) neither counts nor moves the expected date, so the record
/// before it reads as a gap.
pub fn count_consecutive_days(records: &[DayRecord]) -> u32 {
    let Some(latest) = records.first() else {
        return 0;
    };

    let walk = records
        .iter()
        .try_fold((0u32, latest.date), |(streak, expected), record| {
            if record.date != expected {
                return ControlFlow::Break(streak);
            }
            match classify(record) {
                StreakStep::Counts => {
                    ControlFlow::Continue((streak + 1, expected - Duration::days(1)))
                }
                StreakStep::WeeklyRest => ControlFlow::Break(streak),
                StreakStep::Neutral => ControlFlow::Continue((streak, expected)),
            }
        });

    match walk {
        ControlFlow::Break(streak) | ControlFlow::Continue((streak, _)) => streak,
    }
}

/// Returns the two most recent weekly rests in a descending record list.
pub fn recent_weekly_rests(records: &[DayRecord]) -> (Option<WeeklyRest>, Option<WeeklyRest>) {
    let mut rests = records.iter().filter_map(|record| {
        record.day_type.rest_kind().map(|kind| WeeklyRest {
            date: record.date,
            kind,
        })
    });
    (rests.next(), rests.next())
}

/// Decides the next weekly rest kind from the most recent one.
///
/// After a reduced rest the next must be regular. With no rest on record
/// the regular rest is required as well.
pub fn required_next_rest(last: Option<&WeeklyRest>) -> RestRequirement {
    match last.map(|rest| rest.kind) {
        Some(RestKind::Normal) => RestRequirement::Reduced24h,
        Some(RestKind::Reduced) | None => RestRequirement::Regular45h,
    }
}

fn streak_alerts(streak: u32, requirement: RestRequirement) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let days_left = MAX_CONSECUTIVE_WORK_DAYS.saturating_sub(streak);

    if streak > MAX_CONSECUTIVE_WORK_DAYS {
        alerts.push(Alert::error(
            AlertCode::WeeklyRestOverdue,
            format!(
                "{} consecutive working days: weekly rest is overdue and required now",
                streak
            ),
        ));
    } else if streak == MAX_CONSECUTIVE_WORK_DAYS {
        alerts.push(Alert::error(
            AlertCode::WeeklyRestTomorrow,
            format!(
                "{} consecutive working days: weekly rest must start tomorrow",
                streak
            ),
        ));
    } else if streak == MAX_CONSECUTIVE_WORK_DAYS - 1 {
        alerts.push(Alert::warning(
            AlertCode::WeeklyRestNear,
            format!("{} day(s) until the mandatory weekly rest", days_left),
        ));
    }

    if requirement == RestRequirement::Regular45h && streak >= REGULAR_REST_NOTICE_DAYS {
        alerts.push(Alert::warning(
            AlertCode::RegularRestRequired,
            "The next weekly rest must be a regular 45h rest",
        ));
    }

    alerts
}

fn urgency_for(streak: u32) -> Urgency {
    if streak > MAX_CONSECUTIVE_WORK_DAYS {
        Urgency::Violation
    } else if streak == MAX_CONSECUTIVE_WORK_DAYS {
        Urgency::Urgent
    } else if streak == MAX_CONSECUTIVE_WORK_DAYS - 1 {
        Urgency::Warning
    } else {
        Urgency::Normal
    }
}

/// Builds a streak report from records sorted by date descending.
///
/// # Example
///
/// ```
/// use driver_compliance::compliance::{analyze_records, Urgency};
/// use driver_compliance::models::RestRequirement;
/// use chrono::NaiveDate;
///
/// let as_of = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let report = analyze_records("drv_001", as_of, &[]);
/// assert_eq!(report.consecutive_days, 0);
/// assert_eq!(report.urgency, Urgency::Urgent);
/// assert_eq!(report.next_rest_required, RestRequirement::Regular45h);
/// ```
pub fn analyze_records(driver_id: &str, as_of: NaiveDate, records: &[DayRecord]) -> StreakReport {
    let Some(latest) = records.first() else {
        return StreakReport {
            driver_id: driver_id.to_string(),
            as_of,
            latest_record_date: None,
            consecutive_days: 0,
            days_until_mandatory_rest: MAX_CONSECUTIVE_WORK_DAYS,
            next_mandatory_rest_date: None,
            next_rest_required: RestRequirement::Regular45h,
            last_weekly_rest: None,
            previous_weekly_rest: None,
            urgency: Urgency::Urgent,
            alerts: Vec::new(),
        };
    };

    let consecutive_days = count_consecutive_days(records);
    let days_until_mandatory_rest = MAX_CONSECUTIVE_WORK_DAYS.saturating_sub(consecutive_days);
    let (last_weekly_rest, previous_weekly_rest) = recent_weekly_rests(records);
    let next_rest_required = required_next_rest(last_weekly_rest.as_ref());
    let next_mandatory_rest_date =
        latest.date + Duration::days(i64::from(days_until_mandatory_rest) + 1);

    StreakReport {
        driver_id: driver_id.to_string(),
        as_of,
        latest_record_date: Some(latest.date),
        consecutive_days,
        days_until_mandatory_rest,
        next_mandatory_rest_date: Some(next_mandatory_rest_date),
        next_rest_required,
        last_weekly_rest,
        previous_weekly_rest,
        urgency: urgency_for(consecutive_days),
        alerts: streak_alerts(consecutive_days, next_rest_required),
    }
}

/// Reads the driver's history around `as_of` and analyses the streak.
///
/// The window spans 60 days back and 30 days ahead of `as_of`, so advance
/// entries such as booked vacation are taken into account.
pub fn analyze_streak(
    store: &dyn DayRecordStore,
    driver_id: &str,
    as_of: NaiveDate,
) -> ComplianceResult<StreakReport> {
    let from = as_of - Duration::days(STREAK_LOOKBACK_DAYS);
    let to = as_of + Duration::days(STREAK_LOOKAHEAD_DAYS);
    let mut records = store.find_records_in_range(driver_id, from, to)?;
    records.sort_by(|a, b| b.date.cmp(&a.date));

    let report = analyze_records(driver_id, as_of, &records);
    debug!(
        driver_id,
        as_of = %as_of,
        consecutive_days = report.consecutive_days,
        next_rest = %report.next_rest_required,
        "Analysed work streak"
    );
    Ok(report)
}
