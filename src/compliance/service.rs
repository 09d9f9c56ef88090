//! The compliance service exposed to the CRUD layer.
//!
//! [`ComplianceService`] holds no mutable state of its own: it is a pair of
//! injected collaborators plus the pure checks in the sibling modules, so a
//! single instance can be shared across requests.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ComplianceResult;
use crate::models::{Alert, ComplianceOverride, DayProposal, DayRecord, DayType};
use crate::store::{DayRecordStore, HolidayRegistry};

use super::ce561::{ValidationResult, validate_day};
use super::rest_balance::{RestBalance, compute_rest_balance};
use super::streak::{StreakReport, analyze_streak};
use super::window::{WindowStats, aggregate_window};

/// Window statistics and streak state for a driver's detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// Aggregates for the week containing the as-of date, as stored.
    pub window_stats: WindowStats,
    /// The current work streak.
    pub streak_report: StreakReport,
}

/// What happened to a day upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertStatus {
    /// A new record was written.
    Created,
    /// An existing record was replaced.
    Updated,
    /// The day failed validation and was not written.
    Rejected,
}

/// The result of a day upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertOutcome {
    /// Whether the record was written.
    pub status: UpsertStatus,
    /// The record as written, or as it would have been written.
    pub record: DayRecord,
    /// The validation run for work days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
    /// True when a work or training day falls on a national holiday.
    pub worked_holiday: bool,
}

/// Stateless compliance service over injected collaborators.
#[derive(Clone)]
pub struct ComplianceService {
    store: Arc<dyn DayRecordStore>,
    holidays: Arc<dyn HolidayRegistry>,
}

impl ComplianceService {
    /// Creates a service over a day record store and a holiday registry.
    pub fn new(store: Arc<dyn DayRecordStore>, holidays: Arc<dyn HolidayRegistry>) -> Self {
        Self { store, holidays }
    }

    /// Returns the underlying day record store.
    pub fn store(&self) -> &dyn DayRecordStore {
        self.store.as_ref()
    }

    /// Validates a proposed day without writing anything.
    pub fn validate_day(
        &self,
        driver_id: &str,
        proposal: &DayProposal,
    ) -> ComplianceResult<ValidationResult> {
        validate_day(self.store.as_ref(), driver_id, proposal)
    }

    /// Returns the week aggregates and streak state as of `as_of`.
    ///
    /// The stored record on `as_of`, if any, stands in as the proposal so
    /// the aggregates reflect exactly what is persisted. Only a work day
    /// counts toward the days worked.
    pub fn compliance_summary(
        &self,
        driver_id: &str,
        as_of: NaiveDate,
    ) -> ComplianceResult<ComplianceSummary> {
        let proposal = match self.store.find_record(driver_id, as_of)? {
            Some(record) if record.day_type == DayType::Work => DayProposal::from(&record),
            Some(record) => DayProposal {
                working_hours: Default::default(),
                ..DayProposal::from(&record)
            },
            None => DayProposal::new(as_of, Default::default(), Default::default()),
        };
        let window_stats = aggregate_window(self.store.as_ref(), driver_id, &proposal)?;
        let streak_report = analyze_streak(self.store.as_ref(), driver_id, as_of)?;
        Ok(ComplianceSummary {
            window_stats,
            streak_report,
        })
    }

    /// Returns the year-to-date compensatory rest balance up to `month`.
    pub fn monthly_rest_balance(
        &self,
        driver_id: &str,
        year: i32,
        month: u32,
    ) -> ComplianceResult<RestBalance> {
        compute_rest_balance(
            self.store.as_ref(),
            self.holidays.as_ref(),
            driver_id,
            year,
            month,
        )
    }

    /// Lists a driver's records between two dates, inclusive.
    pub fn list_days(
        &self,
        driver_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ComplianceResult<Vec<DayRecord>> {
        self.store.find_records_in_range(driver_id, from, to)
    }

    /// Inserts or replaces a driver's day.
    ///
    /// Work days are validated first. An invalid day is rejected unless
    /// `force` is set, in which case it is written with the alerts attached
    /// as a [`ComplianceOverride`].
    pub fn upsert_day(
        &self,
        record: DayRecord,
        force: bool,
        correlation_id: Uuid,
    ) -> ComplianceResult<UpsertOutcome> {
        let mut record = record.normalized();
        record.compliance_override = None;
        record.check()?;

        let worked_holiday =
            record.day_type.is_worked() && self.holidays.is_national_holiday(record.date);

        let validation = if record.day_type == DayType::Work {
            Some(self.validate_day(&record.driver_id, &DayProposal::from(&record))?)
        } else {
            None
        };

        let failed_alerts: Option<(usize, Vec<Alert>)> = validation
            .as_ref()
            .filter(|v| !v.valid)
            .map(|v| (v.errors().count(), v.alerts.clone()));

        if let Some((errors, alerts)) = failed_alerts {
            if !force {
                warn!(
                    correlation_id = %correlation_id,
                    driver_id = %record.driver_id,
                    date = %record.date,
                    errors,
                    "Day rejected by compliance checks"
                );
                return Ok(UpsertOutcome {
                    status: UpsertStatus::Rejected,
                    record,
                    validation,
                    worked_holiday,
                });
            }

            warn!(
                correlation_id = %correlation_id,
                driver_id = %record.driver_id,
                date = %record.date,
                errors,
                "Day force-saved over compliance errors"
            );
            record.compliance_override = Some(ComplianceOverride {
                correlation_id,
                recorded_at: Utc::now(),
                alerts,
            });
        }

        let existed = self
            .store
            .find_record(&record.driver_id, record.date)?
            .is_some();
        self.store.upsert_record(record.clone())?;

        info!(
            correlation_id = %correlation_id,
            driver_id = %record.driver_id,
            date = %record.date,
            day_type = %record.day_type,
            updated = existed,
            "Day saved"
        );

        Ok(UpsertOutcome {
            status: if existed {
                UpsertStatus::Updated
            } else {
                UpsertStatus::Created
            },
            record,
            validation,
            worked_holiday,
        })
    }

    /// Deletes a driver's day. Returns whether a record existed.
    pub fn delete_day(&self, driver_id: &str, date: NaiveDate) -> ComplianceResult<bool> {
        self.store.delete_record(driver_id, date)
    }
}
