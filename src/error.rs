//! Error types for the compliance engine.
//!
//! Regulatory violations are not errors: they are reported as
//! [`Alert`](crate::models::Alert) values so the caller can decide whether
//! to block or force-save. The variants here cover storage failures,
//! malformed input at the boundary and configuration problems.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the compliance engine.
///
/// # Example
///
/// ```
/// use driver_compliance::error::ComplianceError;
///
/// let error = ComplianceError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum ComplianceError {
    /// The day record store failed to read or write.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// A day record submitted for upsert was malformed.
    #[error("Invalid day record for driver '{driver_id}' on {date}: {message}")]
    InvalidRecord {
        /// The driver the record belongs to.
        driver_id: String,
        /// The calendar date of the record.
        date: NaiveDate,
        /// What made the record invalid.
        message: String,
    },

    /// No day record exists for the driver and date.
    #[error("No day record for driver '{driver_id}' on {date}")]
    RecordNotFound {
        /// The driver that was looked up.
        driver_id: String,
        /// The date that was looked up.
        date: NaiveDate,
    },

    /// The requested accounting period does not exist.
    #[error("Invalid period: {year}-{month}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month (1-12).
        month: u32,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl ComplianceError {
    /// Creates a storage error from anything printable.
    pub fn storage(message: impl Into<String>) -> Self {
        ComplianceError::Storage {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return ComplianceError.
pub type ComplianceResult<T> = Result<T, ComplianceError>;
