//! Core data models for the compliance engine.
//!
//! This module contains the per-driver day records, the holiday calendar
//! entries and the alert types produced by the regulatory checks.

mod alert;
mod day_record;
mod holiday;
mod rest;

pub use alert::{Alert, AlertCode, AlertSeverity};
pub use day_record::{ComplianceOverride, DayProposal, DayRecord, DayType};
pub use holiday::{Holiday, HolidayScope};
pub use rest::{RestKind, RestRequirement, WeeklyRest};
