//! Holiday calendar entries.
//!
//! Holidays are only used as a lookup set: a worked national holiday earns
//! a compensatory rest day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How widely a holiday applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayScope {
    /// Applies across the whole country.
    National,
    /// Applies in one region.
    Regional,
    /// Applies in one municipality.
    Local,
}

/// A single holiday.
///
/// # Example
///
/// ```
/// use driver_compliance::models::{Holiday, HolidayScope};
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
///     name: "Fiesta Nacional de España".to_string(),
///     scope: HolidayScope::National,
///     region: None,
/// };
/// assert!(holiday.is_national());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
    /// How widely it applies.
    pub scope: HolidayScope,
    /// Region code for regional and local holidays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Holiday {
    /// Returns true for national holidays.
    pub fn is_national(&self) -> bool {
        self.scope == HolidayScope::National
    }

    /// Returns true if the holiday is observed in `region`.
    ///
    /// National holidays apply everywhere. Regional and local ones only
    /// apply when their region code matches.
    pub fn applies_in(&self, region: Option<&str>) -> bool {
        self.is_national() || (region.is_some() && self.region.as_deref() == region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_regional_holiday() {
        let json = r#"{
            "date": "2026-05-02",
            "name": "Fiesta de la Comunidad de Madrid",
            "scope": "regional",
            "region": "MD"
        }"#;

        let holiday: Holiday = serde_json::from_str(json).unwrap();
        assert_eq!(holiday.scope, HolidayScope::Regional);
        assert_eq!(holiday.region.as_deref(), Some("MD"));
        assert!(!holiday.is_national());
    }

    #[test]
    fn test_national_holiday_without_region() {
        let json = r#"{"date": "2026-01-01", "name": "Año Nuevo", "scope": "national"}"#;
        let holiday: Holiday = serde_json::from_str(json).unwrap();
        assert!(holiday.is_national());
        assert!(holiday.region.is_none());
    }

    #[test]
    fn test_applies_in_region() {
        let regional = Holiday {
            date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
            name: "Jueves Santo".to_string(),
            scope: HolidayScope::Regional,
            region: Some("MD".to_string()),
        };
        let national = Holiday {
            scope: HolidayScope::National,
            region: None,
            ..regional.clone()
        };

        assert!(regional.applies_in(Some("MD")));
        assert!(!regional.applies_in(Some("CT")));
        assert!(!regional.applies_in(None));
        assert!(national.applies_in(None));
        assert!(national.applies_in(Some("CT")));
    }
}
