//! Configuration types for the compliance engine.
//!
//! These structures are deserialized from the YAML files in a
//! configuration directory.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::Holiday;
use crate::store::HolidayRegistry;

/// Metadata about the deployment the engine serves.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// The operating company.
    pub company: String,
    /// ISO country code the holiday calendar belongs to (e.g., "ES").
    pub country: String,
    /// Region code. Only this region's regional and local holidays are loaded.
    #[serde(default)]
    pub region: Option<String>,
}

/// One holiday file, covering a single calendar year.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayFile {
    /// The year every entry must fall in.
    pub year: i32,
    /// The holidays of that year.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// Holidays indexed by date.
///
/// # Example
///
/// ```
/// use driver_compliance::config::HolidayCalendar;
/// use driver_compliance::models::{Holiday, HolidayScope};
/// use driver_compliance::store::HolidayRegistry;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
/// let calendar = HolidayCalendar::new(vec![Holiday {
///     date,
///     name: "Epifanía del Señor".to_string(),
///     scope: HolidayScope::National,
///     region: None,
/// }]);
/// assert!(calendar.is_national_holiday(date));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    by_date: BTreeMap<NaiveDate, Vec<Holiday>>,
}

impl HolidayCalendar {
    /// Builds a calendar from a list of holidays.
    pub fn new(holidays: impl IntoIterator<Item = Holiday>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Vec<Holiday>> = BTreeMap::new();
        for holiday in holidays {
            by_date.entry(holiday.date).or_default().push(holiday);
        }
        Self { by_date }
    }

    /// Returns every holiday on `date`, whatever its scope.
    pub fn holidays_on(&self, date: NaiveDate) -> &[Holiday] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the number of holidays loaded.
    pub fn len(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }

    /// Returns true if no holidays are loaded.
    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

impl HolidayRegistry for HolidayCalendar {
    fn is_national_holiday(&self, date: NaiveDate) -> bool {
        self.holidays_on(date).iter().any(Holiday::is_national)
    }
}
