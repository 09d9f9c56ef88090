//! In-process day record store.
//!
//! Used by the server binary and the tests. Records are kept per driver in
//! a date-ordered map so range queries are a single `BTreeMap::range`.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::{ComplianceError, ComplianceResult};
use crate::models::DayRecord;

use super::DayRecordStore;

type DriverDays = BTreeMap<NaiveDate, DayRecord>;

/// A [`DayRecordStore`] backed by an in-memory map.
///
/// # Example
///
/// ```
/// use driver_compliance::models::{DayRecord, DayType};
/// use driver_compliance::store::{DayRecordStore, InMemoryDayStore};
/// use chrono::NaiveDate;
///
/// let store = InMemoryDayStore::new();
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// store.upsert_record(DayRecord::new("drv_001", date, DayType::Work)).unwrap();
/// assert!(store.find_record("drv_001", date).unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDayStore {
    drivers: RwLock<HashMap<String, DriverDays>>,
}

impl InMemoryDayStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with records.
    pub fn with_records(records: impl IntoIterator<Item = DayRecord>) -> Self {
        let mut drivers: HashMap<String, DriverDays> = HashMap::new();
        for record in records {
            drivers
                .entry(record.driver_id.clone())
                .or_default()
                .insert(record.date, record);
        }
        Self {
            drivers: RwLock::new(drivers),
        }
    }
}

fn poisoned<T>(_: T) -> ComplianceError {
    ComplianceError::storage("day record store lock poisoned")
}

impl DayRecordStore for InMemoryDayStore {
    fn find_records_in_range(
        &self,
        driver_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ComplianceResult<Vec<DayRecord>> {
        if from > to {
            return Ok(Vec::new());
        }
        let drivers = self.drivers.read().map_err(poisoned)?;
        Ok(drivers
            .get(driver_id)
            .map(|days| days.range(from..=to).map(|(_, r)| r.clone()).collect())
            .unwrap_or_default())
    }

    fn find_record(&self, driver_id: &str, date: NaiveDate) -> ComplianceResult<Option<DayRecord>> {
        let drivers = self.drivers.read().map_err(poisoned)?;
        Ok(drivers
            .get(driver_id)
            .and_then(|days| days.get(&date))
            .cloned())
    }

    fn upsert_record(&self, record: DayRecord) -> ComplianceResult<()> {
        let mut drivers = self.drivers.write().map_err(poisoned)?;
        drivers
            .entry(record.driver_id.clone())
            .or_default()
            .insert(record.date, record);
        Ok(())
    }

    fn delete_record(&self, driver_id: &str, date: NaiveDate) -> ComplianceResult<bool> {
        let mut drivers = self.drivers.write().map_err(poisoned)?;
        Ok(drivers
            .get_mut(driver_id)
            .and_then(|days| days.remove(&date))
            .is_some())
    }
}
