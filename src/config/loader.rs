//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! metadata and holiday calendars from YAML files.

use chrono::Datelike;
use std::fs;
use std::path::Path;

use crate::error::{ComplianceError, ComplianceResult};
use crate::models::Holiday;

use super::types::{EngineMetadata, HolidayCalendar, HolidayFile};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/es/
/// ├── engine.yaml        # Company and country metadata
/// └── holidays/
///     ├── 2025.yaml      # Holidays for one year each
///     └── 2026.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use driver_compliance::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/es")?;
/// println!("Loaded calendar for {}", loader.engine().country);
/// # Ok::<(), driver_compliance::error::ComplianceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    engine: EngineMetadata,
    holidays: HolidayCalendar,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Regional and local holidays are kept only when they belong to the
    /// engine's region.
    ///
    /// Fails with `ConfigNotFound` if `engine.yaml` or the `holidays`
    /// directory is missing, and with `ConfigParseError` if a file is not
    /// valid YAML or a holiday falls outside its file's year.
    pub fn load<P: AsRef<Path>>(path: P) -> ComplianceResult<Self> {
        let path = path.as_ref();

        let engine = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;
        let region = engine.region.as_deref();
        let holidays = HolidayCalendar::new(
            Self::load_holidays(&path.join("holidays"))?
                .into_iter()
                .filter(|h| h.applies_in(region)),
        );

        Ok(Self { engine, holidays })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> ComplianceResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ComplianceError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ComplianceError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every holiday file in the holidays directory.
    fn load_holidays(holidays_dir: &Path) -> ComplianceResult<Vec<Holiday>> {
        let dir_str = holidays_dir.display().to_string();

        let entries = fs::read_dir(holidays_dir).map_err(|_| ComplianceError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut holidays = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| ComplianceError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yaml") {
                continue;
            }

            let file = Self::load_yaml::<HolidayFile>(&path)?;
            if let Some(stray) = file.holidays.iter().find(|h| h.date.year() != file.year) {
                return Err(ComplianceError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!(
                        "holiday '{}' on {} is outside year {}",
                        stray.name, stray.date, file.year
                    ),
                });
            }
            holidays.extend(file.holidays);
        }

        Ok(holidays)
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        &self.engine
    }

    /// Returns the loaded holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }

    /// Consumes the loader, returning the holiday calendar.
    pub fn into_holidays(self) -> HolidayCalendar {
        self.holidays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::HolidayRegistry;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/es"
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    /// Creates an empty scratch directory unique to the test.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "driver-compliance-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(dir.join("holidays")).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.engine().country, "ES");
    }

    #[test]
    fn test_spanish_national_holidays_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let holidays = loader.holidays();

        assert!(holidays.is_national_holiday(make_date("2026-01-01")));
        assert!(holidays.is_national_holiday(make_date("2026-01-06")));
        assert!(holidays.is_national_holiday(make_date("2025-12-25")));
        assert!(!holidays.is_national_holiday(make_date("2026-03-03")));
    }

    #[test]
    fn test_regional_holidays_dropped_without_region() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(loader.engine().region.is_none());
        assert!(loader.holidays().holidays_on(make_date("2026-04-02")).is_empty());
        assert_eq!(loader.holidays().holidays_on(make_date("2026-04-03")).len(), 1);
    }

    #[test]
    fn test_only_own_region_holidays_kept() {
        let dir = scratch_dir("region");
        fs::write(dir.join("engine.yaml"), "company: Test\ncountry: ES\nregion: MD\n").unwrap();
        fs::write(
            dir.join("holidays/2026.yaml"),
            concat!(
                "year: 2026\n",
                "holidays:\n",
                "  - date: \"2026-01-01\"\n    name: Año Nuevo\n    scope: national\n",
                "  - date: \"2026-04-02\"\n    name: Jueves Santo\n    scope: regional\n    region: MD\n",
                "  - date: \"2026-04-23\"\n    name: Sant Jordi\n    scope: regional\n    region: CT\n",
            ),
        )
        .unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        let holidays = loader.holidays();
        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays.holidays_on(make_date("2026-04-02")).len(), 1);
        assert!(holidays.holidays_on(make_date("2026-04-23")).is_empty());
        assert!(!holidays.is_national_holiday(make_date("2026-04-02")));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(ComplianceError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_missing_holidays_directory_returns_error() {
        let dir = std::env::temp_dir().join(format!(
            "driver-compliance-noholidays-{}",
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("engine.yaml"), "company: Test\ncountry: ES\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(ComplianceError::ConfigNotFound { path }) => {
                assert!(path.ends_with("holidays"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_holiday_outside_file_year_is_rejected() {
        let dir = scratch_dir("stray");
        fs::write(dir.join("engine.yaml"), "company: Test\ncountry: ES\n").unwrap();
        fs::write(
            dir.join("holidays/2026.yaml"),
            "year: 2026\nholidays:\n  - date: \"2025-12-25\"\n    name: Navidad\n    scope: national\n",
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(ComplianceError::ConfigParseError { message, .. }) => {
                assert!(message.contains("outside year 2026"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("badyaml");
        fs::write(dir.join("engine.yaml"), "company: [unterminated\n").unwrap();

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(ComplianceError::ConfigParseError { .. })
        ));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_non_yaml_files_are_ignored() {
        let dir = scratch_dir("readme");
        fs::write(dir.join("engine.yaml"), "company: Test\ncountry: ES\nregion: MD\n").unwrap();
        fs::write(dir.join("holidays/README.txt"), "not yaml").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.engine().region.as_deref(), Some("MD"));
        assert!(loader.holidays().is_empty());
        fs::remove_dir_all(dir).ok();
    }
}
