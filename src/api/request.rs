//! Request types for the compliance API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DayProposal, DayRecord, DayType};

/// Request body for `POST /days/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateDayRequest {
    /// The driver the day belongs to.
    pub driver_id: String,
    /// The proposed date.
    pub date: NaiveDate,
    /// Proposed driving hours.
    pub driving_hours: Decimal,
    /// Proposed working hours.
    pub working_hours: Decimal,
    /// Total driving break taken, in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_minutes: Option<u32>,
    /// Daily rest taken before the day, in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_rest_hours: Option<Decimal>,
}

impl ValidateDayRequest {
    /// Returns the proposal part of the request.
    pub fn proposal(&self) -> DayProposal {
        DayProposal {
            date: self.date,
            driving_hours: self.driving_hours,
            working_hours: self.working_hours,
            pause_minutes: self.pause_minutes,
            night_rest_hours: self.night_rest_hours,
        }
    }
}

/// Request body for `PUT /drivers/:driver_id/days/:date`.
///
/// Driver and date come from the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertDayRequest {
    /// The kind of day.
    pub day_type: DayType,
    /// Driving hours. Ignored for non-work days.
    #[serde(default)]
    pub driving_hours: Decimal,
    /// Working hours. Ignored for rest and absence days.
    #[serde(default)]
    pub working_hours: Decimal,
    /// Total driving break taken, in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_minutes: Option<u32>,
    /// Daily rest taken before the day, in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_rest_hours: Option<Decimal>,
    /// Save even if validation fails.
    #[serde(default)]
    pub force: bool,
}

impl UpsertDayRequest {
    /// Builds the day record for the given driver and date.
    pub fn into_record(self, driver_id: String, date: NaiveDate) -> DayRecord {
        DayRecord {
            pause_minutes: self.pause_minutes,
            night_rest_hours: self.night_rest_hours,
            ..DayRecord::new(driver_id, date, self.day_type)
                .with_hours(self.driving_hours, self.working_hours)
        }
    }
}

/// Query string for `GET /drivers/:driver_id/days`.
#[derive(Debug, Clone, Deserialize)]
pub struct DateRangeQuery {
    /// First date, inclusive.
    pub from: NaiveDate,
    /// Last date, inclusive.
    pub to: NaiveDate,
}

/// Query string for `GET /drivers/:driver_id/compliance`.
#[derive(Debug, Clone, Deserialize)]
pub struct AsOfQuery {
    /// The reference date. Defaults to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}
