//! Storage collaborators used by the compliance engine.
//!
//! The engine never owns persisted state. It reads and writes day records
//! through [`DayRecordStore`] and looks up holidays through
//! [`HolidayRegistry`]. Any store failure is returned unchanged to the
//! caller.

mod memory;

use chrono::NaiveDate;

use crate::error::ComplianceResult;
use crate::models::DayRecord;

pub use memory::InMemoryDayStore;

/// Query and write operations over per-driver day records.
pub trait DayRecordStore: Send + Sync {
    /// Returns the driver's records with `from <= date <= to`, ascending by date.
    fn find_records_in_range(
        &self,
        driver_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ComplianceResult<Vec<DayRecord>>;

    /// Returns the driver's record on `date`, if any.
    fn find_record(&self, driver_id: &str, date: NaiveDate) -> ComplianceResult<Option<DayRecord>>;

    /// Inserts the record or replaces the one with the same driver and date.
    fn upsert_record(&self, record: DayRecord) -> ComplianceResult<()>;

    /// Removes the driver's record on `date`. Returns whether one existed.
    fn delete_record(&self, driver_id: &str, date: NaiveDate) -> ComplianceResult<bool>;
}

/// Holiday lookups.
pub trait HolidayRegistry: Send + Sync {
    /// Returns true if `date` is a national holiday.
    fn is_national_holiday(&self, date: NaiveDate) -> bool;
}
