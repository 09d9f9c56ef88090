//! Driving-time compliance checks under CE 561/2006.
//!
//! This module contains the rolling-window aggregation, the per-day
//! validator, the consecutive-work streak analysis and the compensatory
//! rest accounting, plus [`ComplianceService`] which wires them to a
//! [`DayRecordStore`](crate::store::DayRecordStore) and a
//! [`HolidayRegistry`](crate::store::HolidayRegistry).
//!
//! Thresholds are regulatory constants and are not configurable.

mod ce561;
mod dates;
mod rest_balance;
mod service;
mod streak;
mod window;

pub use ce561::{
    BIWEEKLY_DRIVING_LIMIT, CONTINUOUS_DRIVING_LIMIT, EXTENDED_DAILY_DRIVING_LIMIT,
    MAX_WEEKLY_EXTENSIONS, MAX_WORKING_DAYS_PER_WEEK, MIN_DRIVING_BREAK_MINUTES,
    REDUCED_DAILY_REST, REGULAR_DAILY_REST, ValidationResult, WARNING_RATIO, WEEKLY_DRIVING_LIMIT,
    check_driving_limits, validate_day,
};
pub use dates::{
    DateWindow, biweekly_window, last_day_of_month, week_start, week_window,
    year_to_month_window,
};
pub use rest_balance::{
    RESTS_PER_BLOCK, RestBalance, WORKED_DAYS_PER_BLOCK, compute_rest_balance, tally_rest_balance,
};
pub use service::{ComplianceService, ComplianceSummary, UpsertOutcome, UpsertStatus};
pub use streak::{
    MAX_CONSECUTIVE_WORK_DAYS, STREAK_LOOKAHEAD_DAYS, STREAK_LOOKBACK_DAYS, StreakReport, Urgency,
    analyze_records, analyze_streak, count_consecutive_days, recent_weekly_rests,
    required_next_rest,
};
pub use window::{DAILY_DRIVING_LIMIT, WindowStats, aggregate_window, summarize_window};
