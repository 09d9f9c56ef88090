//! Day record model and related types.
//!
//! A [`DayRecord`] is one row per (driver, calendar date). The store keeps
//! at most one record per pair; an upsert replaces whatever was there.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ComplianceError, ComplianceResult};

use super::{Alert, RestKind};

/// The kind of day a driver had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// A working day with driving and/or other work.
    Work,
    /// A regular weekly rest (45 hours).
    RestNormal,
    /// A reduced weekly rest (24 hours).
    RestReduced,
    /// A public holiday not worked.
    Holiday,
    /// Paid vacation.
    Vacation,
    /// Sick leave.
    SickLeave,
    /// A training day. Counts as worked for the collective agreement but
    /// never as tachograph driving.
    Training,
    /// Not active (suspended contract, not yet hired, ...).
    Inactive,
}

impl DayType {
    /// Returns true for days that extend a consecutive work streak.
    pub fn is_worked(self) -> bool {
        matches!(self, DayType::Work | DayType::Training)
    }

    /// Returns the weekly rest kind for rest days, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// use driver_compliance::models::{DayType, RestKind};
    ///
    /// assert_eq!(DayType::RestReduced.rest_kind(), Some(RestKind::Reduced));
    /// assert_eq!(DayType::Vacation.rest_kind(), None);
    /// ```
    pub fn rest_kind(self) -> Option<RestKind> {
        match self {
            DayType::RestNormal => Some(RestKind::Normal),
            DayType::RestReduced => Some(RestKind::Reduced),
            _ => None,
        }
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DayType::Work => "work",
            DayType::RestNormal => "rest_normal",
            DayType::RestReduced => "rest_reduced",
            DayType::Holiday => "holiday",
            DayType::Vacation => "vacation",
            DayType::SickLeave => "sick_leave",
            DayType::Training => "training",
            DayType::Inactive => "inactive",
        };
        f.write_str(name)
    }
}

/// Audit trail attached to a day that was saved despite error alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceOverride {
    /// Correlation id of the request that forced the save.
    pub correlation_id: Uuid,
    /// When the override was recorded.
    pub recorded_at: DateTime<Utc>,
    /// The alerts that were raised and overridden.
    pub alerts: Vec<Alert>,
}

/// A single driver's record for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// The driver owning this record.
    pub driver_id: String,
    /// The calendar date.
    pub date: NaiveDate,
    /// What kind of day it was.
    pub day_type: DayType,
    /// Hours spent driving. Meaningful only for work days.
    #[serde(default)]
    pub driving_hours: Decimal,
    /// Total hours worked, driving included.
    #[serde(default)]
    pub working_hours: Decimal,
    /// Minutes of break taken during driving, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_minutes: Option<u32>,
    /// Hours of daily (night) rest before the day, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_rest_hours: Option<Decimal>,
    /// Present when the day was force-saved over error alerts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_override: Option<ComplianceOverride>,
}

impl DayRecord {
    /// Creates a record with zero hours and no auxiliary fields.
    ///
    /// # Example
    ///
    /// ```
    /// use driver_compliance::models::{DayRecord, DayType};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let record = DayRecord::new("drv_001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), DayType::Work)
    ///     .with_hours(Decimal::new(9, 0), Decimal::new(11, 0));
    /// assert_eq!(record.driving_hours, Decimal::new(9, 0));
    /// ```
    pub fn new(driver_id: impl Into<String>, date: NaiveDate, day_type: DayType) -> Self {
        Self {
            driver_id: driver_id.into(),
            date,
            day_type,
            driving_hours: Decimal::ZERO,
            working_hours: Decimal::ZERO,
            pause_minutes: None,
            night_rest_hours: None,
            compliance_override: None,
        }
    }

    /// Sets driving and working hours.
    pub fn with_hours(mut self, driving_hours: Decimal, working_hours: Decimal) -> Self {
        self.driving_hours = driving_hours;
        self.working_hours = working_hours;
        self
    }

    /// Returns true if the date is a Sunday.
    pub fn is_sunday(&self) -> bool {
        self.date.weekday() == Weekday::Sun
    }

    /// Clears hour fields that have no meaning for the record's day type.
    ///
    /// Training days never carry driving hours; rest and absence days carry
    /// neither driving nor working hours.
    pub fn normalized(mut self) -> Self {
        match self.day_type {
            DayType::Work => {}
            DayType::Training => self.driving_hours = Decimal::ZERO,
            _ => {
                self.driving_hours = Decimal::ZERO;
                self.working_hours = Decimal::ZERO;
            }
        }
        self
    }

    /// Checks the record is well formed before it is written.
    pub fn check(&self) -> ComplianceResult<()> {
        let invalid = |message: &str| ComplianceError::InvalidRecord {
            driver_id: self.driver_id.clone(),
            date: self.date,
            message: message.to_string(),
        };

        if self.driver_id.trim().is_empty() {
            return Err(invalid("driver id is required"));
        }
        if self.driving_hours.is_sign_negative() {
            return Err(invalid("driving hours cannot be negative"));
        }
        if self.working_hours.is_sign_negative() {
            return Err(invalid("working hours cannot be negative"));
        }
        if self
            .night_rest_hours
            .is_some_and(|hours| hours.is_sign_negative())
        {
            return Err(invalid("night rest hours cannot be negative"));
        }
        Ok(())
    }
}

/// A day being proposed for validation, not necessarily persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProposal {
    /// The date being proposed.
    pub date: NaiveDate,
    /// Proposed driving hours.
    pub driving_hours: Decimal,
    /// Proposed working hours.
    pub working_hours: Decimal,
    /// Break minutes, if known.
    #[serde(default)]
    pub pause_minutes: Option<u32>,
    /// Preceding daily rest in hours, if known.
    #[serde(default)]
    pub night_rest_hours: Option<Decimal>,
}

impl DayProposal {
    /// Creates a proposal with only driving and working hours.
    pub fn new(date: NaiveDate, driving_hours: Decimal, working_hours: Decimal) -> Self {
        Self {
            date,
            driving_hours,
            working_hours,
            pause_minutes: None,
            night_rest_hours: None,
        }
    }
}

impl From<&DayRecord> for DayProposal {
    fn from(record: &DayRecord) -> Self {
        Self {
            date: record.date,
            driving_hours: record.driving_hours,
            working_hours: record.working_hours,
            pause_minutes: record.pause_minutes,
            night_rest_hours: record.night_rest_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_day_type_serialization() {
        assert_eq!(serde_json::to_string(&DayType::Work).unwrap(), "\"work\"");
        assert_eq!(
            serde_json::to_string(&DayType::RestReduced).unwrap(),
            "\"rest_reduced\""
        );
        assert_eq!(
            serde_json::to_string(&DayType::SickLeave).unwrap(),
            "\"sick_leave\""
        );
        let parsed: DayType = serde_json::from_str("\"rest_normal\"").unwrap();
        assert_eq!(parsed, DayType::RestNormal);
    }

    #[test]
    fn test_day_type_display_matches_wire_name() {
        for day_type in [
            DayType::Work,
            DayType::RestNormal,
            DayType::RestReduced,
            DayType::Holiday,
            DayType::Vacation,
            DayType::SickLeave,
            DayType::Training,
            DayType::Inactive,
        ] {
            let wire = serde_json::to_string(&day_type).unwrap();
            assert_eq!(wire, format!("\"{}\"", day_type));
        }
    }

    #[test]
    fn test_is_worked() {
        assert!(DayType::Work.is_worked());
        assert!(DayType::Training.is_worked());
        assert!(!DayType::Holiday.is_worked());
        assert!(!DayType::RestNormal.is_worked());
    }

    #[test]
    fn test_deserialize_record_defaults_hours() {
        let json = r#"{
            "driver_id": "drv_001",
            "date": "2026-03-02",
            "day_type": "vacation"
        }"#;

        let record: DayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.driving_hours, Decimal::ZERO);
        assert_eq!(record.working_hours, Decimal::ZERO);
        assert!(record.pause_minutes.is_none());
        assert!(record.compliance_override.is_none());
    }

    #[test]
    fn test_normalized_training_drops_driving() {
        let record = DayRecord::new("drv_001", make_date("2026-03-02"), DayType::Training)
            .with_hours(Decimal::new(3, 0), Decimal::new(8, 0))
            .normalized();
        assert_eq!(record.driving_hours, Decimal::ZERO);
        assert_eq!(record.working_hours, Decimal::new(8, 0));
    }

    #[test]
    fn test_normalized_rest_drops_all_hours() {
        let record = DayRecord::new("drv_001", make_date("2026-03-02"), DayType::RestNormal)
            .with_hours(Decimal::new(3, 0), Decimal::new(8, 0))
            .normalized();
        assert_eq!(record.driving_hours, Decimal::ZERO);
        assert_eq!(record.working_hours, Decimal::ZERO);
    }

    #[test]
    fn test_normalized_work_keeps_hours() {
        let record = DayRecord::new("drv_001", make_date("2026-03-02"), DayType::Work)
            .with_hours(Decimal::new(95, 1), Decimal::new(11, 0))
            .normalized();
        assert_eq!(record.driving_hours, Decimal::new(95, 1));
    }

    #[test]
    fn test_check_rejects_negative_driving() {
        let record = DayRecord::new("drv_001", make_date("2026-03-02"), DayType::Work)
            .with_hours(Decimal::new(-1, 0), Decimal::ZERO);
        assert!(matches!(
            record.check(),
            Err(ComplianceError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_check_rejects_blank_driver() {
        let record = DayRecord::new("  ", make_date("2026-03-02"), DayType::Work);
        assert!(record.check().is_err());
    }

    #[test]
    fn test_is_sunday() {
        // 2026-03-08 is a Sunday
        let record = DayRecord::new("drv_001", make_date("2026-03-08"), DayType::Work);
        assert!(record.is_sunday());
        let monday = DayRecord::new("drv_001", make_date("2026-03-09"), DayType::Work);
        assert!(!monday.is_sunday());
    }

    #[test]
    fn test_proposal_from_record_copies_auxiliary_fields() {
        let mut record = DayRecord::new("drv_001", make_date("2026-03-02"), DayType::Work)
            .with_hours(Decimal::new(8, 0), Decimal::new(10, 0));
        record.pause_minutes = Some(45);

        let proposal = DayProposal::from(&record);
        assert_eq!(proposal.driving_hours, Decimal::new(8, 0));
        assert_eq!(proposal.pause_minutes, Some(45));
        assert_eq!(proposal.night_rest_hours, None);
    }
}
