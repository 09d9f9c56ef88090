//! CE 561/2006 driving-time validation.
//!
//! Applies the regulation's driving limits and the collective agreement's
//! working-day cap to a proposed day and its window aggregates.
//!
//! ## Limits
//!
//! | Limit | Value |
//! |---|---|
//! | Daily driving | 9 h, or 10 h at most twice a week |
//! | Weekly driving | 56 h |
//! | Driving over two consecutive weeks | 90 h |
//! | Working days per week (collective agreement) | 5 |
//!
//! Every crossed threshold produces exactly one alert. The checks are
//! independent, so one day can raise several errors at once.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ComplianceResult;
use crate::models::{Alert, AlertCode, DayProposal, RestRequirement};
use crate::store::DayRecordStore;

use super::streak::analyze_streak;
use super::window::{DAILY_DRIVING_LIMIT, WindowStats, aggregate_window};

/// Absolute daily driving ceiling in hours.
pub const EXTENDED_DAILY_DRIVING_LIMIT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Extended driving days allowed per week.
pub const MAX_WEEKLY_EXTENSIONS: u32 = 2;

/// Weekly driving ceiling in hours.
pub const WEEKLY_DRIVING_LIMIT: Decimal = Decimal::from_parts(56, 0, 0, false, 0);

/// Ceiling in hours for driving over the current and previous week.
pub const BIWEEKLY_DRIVING_LIMIT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Working days per week allowed by the collective agreement.
pub const MAX_WORKING_DAYS_PER_WEEK: u32 = 5;

/// Fraction of a limit above which a warning is raised (0.9).
pub const WARNING_RATIO: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Continuous driving after which a break is due (4.5 h).
pub const CONTINUOUS_DRIVING_LIMIT: Decimal = Decimal::from_parts(45, 0, 0, false, 1);

/// Minimum break after continuous driving, in minutes.
pub const MIN_DRIVING_BREAK_MINUTES: u32 = 45;

/// Regular daily rest in hours.
pub const REGULAR_DAILY_REST: Decimal = Decimal::from_parts(11, 0, 0, false, 0);

/// Reduced daily rest in hours; anything below is a violation.
pub const REDUCED_DAILY_REST: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// The outcome of validating a proposed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// The driver the day belongs to.
    pub driver_id: String,
    /// The proposed date.
    pub date: NaiveDate,
    /// True if no alert has error severity.
    pub valid: bool,
    /// Every alert raised, in check order.
    pub alerts: Vec<Alert>,
    /// The window aggregates the checks were run against.
    pub stats: WindowStats,
    /// The latest date the next weekly rest can start. Advisory only.
    pub next_mandatory_rest_date: Option<NaiveDate>,
    /// Which kind of weekly rest must come next. Advisory only.
    pub next_rest_required: RestRequirement,
}

impl ValidationResult {
    /// Returns the alerts with error severity.
    pub fn errors(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|a| a.is_error())
    }
}

/// Runs the driving-time checks against a proposal and its window.
///
/// # Example
///
/// ```
/// use driver_compliance::compliance::{check_driving_limits, summarize_window};
/// use driver_compliance::models::{AlertCode, DayProposal};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let proposal = DayProposal::new(
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     Decimal::new(11, 0),
///     Decimal::new(12, 0),
/// );
/// let stats = summarize_window(&[], &proposal);
/// let alerts = check_driving_limits(&proposal, &stats);
/// assert_eq!(alerts.len(), 1);
/// assert_eq!(alerts[0].code, AlertCode::DailyDrivingMax);
/// ```
pub fn check_driving_limits(proposal: &DayProposal, stats: &WindowStats) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let driving = proposal.driving_hours;

    if driving > EXTENDED_DAILY_DRIVING_LIMIT {
        alerts.push(
            Alert::error(
                AlertCode::DailyDrivingMax,
                format!(
                    "Daily driving of {}h exceeds the absolute {}h limit",
                    driving, EXTENDED_DAILY_DRIVING_LIMIT
                ),
            )
            .with_values(driving, EXTENDED_DAILY_DRIVING_LIMIT),
        );
    } else if driving > DAILY_DRIVING_LIMIT {
        let used = stats.extensions_this_week;
        let alert = if used > MAX_WEEKLY_EXTENSIONS {
            Alert::error(
                AlertCode::ExtensionsExhausted,
                format!(
                    "Weekly driving extensions exhausted: this would be extension {} of {}",
                    used, MAX_WEEKLY_EXTENSIONS
                ),
            )
        } else {
            Alert::warning(
                AlertCode::ExtensionUsed,
                format!(
                    "Extended driving day: {} of {} weekly extensions used",
                    used, MAX_WEEKLY_EXTENSIONS
                ),
            )
        };
        alerts.push(alert.with_values(Decimal::from(used), Decimal::from(MAX_WEEKLY_EXTENSIONS)));
    }

    if let Some(alert) = check_cumulative(
        stats.weekly_driving,
        WEEKLY_DRIVING_LIMIT,
        AlertCode::WeeklyDrivingMax,
        AlertCode::WeeklyDrivingNear,
        "Weekly",
    ) {
        alerts.push(alert);
    }

    if let Some(alert) = check_cumulative(
        stats.biweekly_driving,
        BIWEEKLY_DRIVING_LIMIT,
        AlertCode::BiweeklyDrivingMax,
        AlertCode::BiweeklyDrivingNear,
        "Bi-weekly",
    ) {
        alerts.push(alert);
    }

    if stats.days_worked_this_week > MAX_WORKING_DAYS_PER_WEEK {
        alerts.push(
            Alert::error(
                AlertCode::WorkingDaysMax,
                format!(
                    "{} working days this week exceed the agreed maximum of {}",
                    stats.days_worked_this_week, MAX_WORKING_DAYS_PER_WEEK
                ),
            )
            .with_values(
                Decimal::from(stats.days_worked_this_week),
                Decimal::from(MAX_WORKING_DAYS_PER_WEEK),
            ),
        );
    }

    alerts.extend(check_rest_periods(proposal));
    alerts
}

fn check_cumulative(
    total: Decimal,
    limit: Decimal,
    max_code: AlertCode,
    near_code: AlertCode,
    label: &str,
) -> Option<Alert> {
    if total > limit {
        Some(
            Alert::error(
                max_code,
                format!("{} driving of {}h exceeds the {}h limit", label, total, limit),
            )
            .with_values(total, limit),
        )
    } else if total > limit * WARNING_RATIO {
        Some(
            Alert::warning(
                near_code,
                format!(
                    "{} driving of {}h is approaching the {}h limit",
                    label, total, limit
                ),
            )
            .with_values(total, limit),
        )
    } else {
        None
    }
}

/// Break and daily rest checks. Only run for the fields that were supplied.
fn check_rest_periods(proposal: &DayProposal) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if let Some(pause) = proposal.pause_minutes {
        if proposal.driving_hours > CONTINUOUS_DRIVING_LIMIT && pause < MIN_DRIVING_BREAK_MINUTES {
            alerts.push(
                Alert::warning(
                    AlertCode::InsufficientBreak,
                    format!(
                        "{} minutes of break for {}h of driving; at least {} are required after {}h",
                        pause, proposal.driving_hours, MIN_DRIVING_BREAK_MINUTES, CONTINUOUS_DRIVING_LIMIT
                    ),
                )
                .with_values(Decimal::from(pause), Decimal::from(MIN_DRIVING_BREAK_MINUTES)),
            );
        }
    }

    if let Some(rest) = proposal.night_rest_hours {
        if rest < REDUCED_DAILY_REST {
            alerts.push(
                Alert::error(
                    AlertCode::DailyRestMin,
                    format!(
                        "Daily rest of {}h is below the {}h minimum",
                        rest, REDUCED_DAILY_REST
                    ),
                )
                .with_values(rest, REDUCED_DAILY_REST),
            );
        } else if rest < REGULAR_DAILY_REST {
            alerts.push(
                Alert::info(
                    AlertCode::DailyRestReduced,
                    format!(
                        "Daily rest of {}h counts as a reduced daily rest",
                        rest
                    ),
                )
                .with_values(rest, REGULAR_DAILY_REST),
            );
        }
    }

    alerts
}

/// Validates a proposed day for a driver.
///
/// Reads the driver's window from the store, runs every check and attaches
/// the next weekly rest due as advisory information. The result is
/// returned whether or not the day is valid; the caller decides whether to
/// persist it.
pub fn validate_day(
    store: &dyn DayRecordStore,
    driver_id: &str,
    proposal: &DayProposal,
) -> ComplianceResult<ValidationResult> {
    let stats = aggregate_window(store, driver_id, proposal)?;
    let alerts = check_driving_limits(proposal, &stats);
    let streak = analyze_streak(store, driver_id, proposal.date)?;

    Ok(ValidationResult {
        driver_id: driver_id.to_string(),
        date: proposal.date,
        valid: !alerts.iter().any(Alert::is_error),
        alerts,
        stats,
        next_mandatory_rest_date: streak.next_mandatory_rest_date,
        next_rest_required: streak.next_rest_required,
    })
}
