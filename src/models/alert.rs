//! Alert model produced by the regulatory checks.
//!
//! Alerts are data, not errors. A day with error-severity alerts is
//! invalid, but the caller may still force-save it and keep the alerts as
//! an audit trail.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How serious an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Informational only.
    Info,
    /// Approaching a limit or consuming a limited allowance. Never blocks.
    Warning,
    /// A hard legal or contractual ceiling was breached.
    Error,
}

/// Identifies the rule that raised an alert.
///
/// The wire codes are stable identifiers consumed by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertCode {
    /// Daily driving above the absolute 10 h ceiling.
    #[serde(rename = "CE561_DIARIO_MAX")]
    DailyDrivingMax,
    /// An extended (over 9 h) driving day used within the weekly allowance.
    #[serde(rename = "CE561_EXTENSION")]
    ExtensionUsed,
    /// More than two extended driving days in the week.
    #[serde(rename = "CE561_EXTENSIONES_MAX")]
    ExtensionsExhausted,
    /// Weekly driving above 56 h.
    #[serde(rename = "CE561_SEMANAL_MAX")]
    WeeklyDrivingMax,
    /// Weekly driving above 90% of 56 h.
    #[serde(rename = "CE561_SEMANAL_PROXIMO")]
    WeeklyDrivingNear,
    /// Driving over the current and previous week above 90 h.
    #[serde(rename = "CE561_BISEMANAL_MAX")]
    BiweeklyDrivingMax,
    /// Driving over the current and previous week above 90% of 90 h.
    #[serde(rename = "CE561_BISEMANAL_PROXIMO")]
    BiweeklyDrivingNear,
    /// More worked days in the week than the collective agreement allows.
    #[serde(rename = "CONVENIO_DIAS_MAX")]
    WorkingDaysMax,
    /// Break shorter than 45 minutes after more than 4.5 h driving.
    #[serde(rename = "CE561_PAUSA_INSUFICIENTE")]
    InsufficientBreak,
    /// Daily rest below the 9 h reduced minimum.
    #[serde(rename = "CE561_DESCANSO_DIARIO_MIN")]
    DailyRestMin,
    /// Daily rest taken in its reduced form (9 h to 11 h).
    #[serde(rename = "CE561_DESCANSO_DIARIO_REDUCIDO")]
    DailyRestReduced,
    /// Seven or more consecutive worked days.
    #[serde(rename = "DESCANSO_SEMANAL_VIOLADO")]
    WeeklyRestOverdue,
    /// Six consecutive worked days: rest is due tomorrow.
    #[serde(rename = "DESCANSO_SEMANAL_MANANA")]
    WeeklyRestTomorrow,
    /// Five consecutive worked days.
    #[serde(rename = "DESCANSO_SEMANAL_PROXIMO")]
    WeeklyRestNear,
    /// The next weekly rest must be the regular 45 h kind.
    #[serde(rename = "DESCANSO_45H_REQUERIDO")]
    RegularRestRequired,
}

impl AlertCode {
    /// Returns the wire identifier of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            AlertCode::DailyDrivingMax => "CE561_DIARIO_MAX",
            AlertCode::ExtensionUsed => "CE561_EXTENSION",
            AlertCode::ExtensionsExhausted => "CE561_EXTENSIONES_MAX",
            AlertCode::WeeklyDrivingMax => "CE561_SEMANAL_MAX",
            AlertCode::WeeklyDrivingNear => "CE561_SEMANAL_PROXIMO",
            AlertCode::BiweeklyDrivingMax => "CE561_BISEMANAL_MAX",
            AlertCode::BiweeklyDrivingNear => "CE561_BISEMANAL_PROXIMO",
            AlertCode::WorkingDaysMax => "CONVENIO_DIAS_MAX",
            AlertCode::InsufficientBreak => "CE561_PAUSA_INSUFICIENTE",
            AlertCode::DailyRestMin => "CE561_DESCANSO_DIARIO_MIN",
            AlertCode::DailyRestReduced => "CE561_DESCANSO_DIARIO_REDUCIDO",
            AlertCode::WeeklyRestOverdue => "DESCANSO_SEMANAL_VIOLADO",
            AlertCode::WeeklyRestTomorrow => "DESCANSO_SEMANAL_MANANA",
            AlertCode::WeeklyRestNear => "DESCANSO_SEMANAL_PROXIMO",
            AlertCode::RegularRestRequired => "DESCANSO_45H_REQUERIDO",
        }
    }

    /// Returns the provision the rule comes from.
    pub fn regulation_ref(self) -> &'static str {
        match self {
            AlertCode::DailyDrivingMax
            | AlertCode::ExtensionUsed
            | AlertCode::ExtensionsExhausted => "CE 561/2006 art. 6.1",
            AlertCode::WeeklyDrivingMax | AlertCode::WeeklyDrivingNear => "CE 561/2006 art. 6.2",
            AlertCode::BiweeklyDrivingMax | AlertCode::BiweeklyDrivingNear => {
                "CE 561/2006 art. 6.3"
            }
            AlertCode::InsufficientBreak => "CE 561/2006 art. 7",
            AlertCode::DailyRestMin | AlertCode::DailyRestReduced => "CE 561/2006 art. 8.2",
            AlertCode::WeeklyRestOverdue
            | AlertCode::WeeklyRestTomorrow
            | AlertCode::WeeklyRestNear => "CE 561/2006 art. 8.6",
            AlertCode::RegularRestRequired => "CE 561/2006 art. 8.6",
            AlertCode::WorkingDaysMax => "Collective agreement",
        }
    }
}

impl std::fmt::Display for AlertCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding from a regulatory check.
///
/// # Example
///
/// ```
/// use driver_compliance::models::{Alert, AlertCode, AlertSeverity};
/// use rust_decimal::Decimal;
///
/// let alert = Alert::error(AlertCode::WeeklyDrivingMax, "Weekly driving exceeds 56h")
///     .with_values(Decimal::new(63, 0), Decimal::new(56, 0));
/// assert_eq!(alert.severity, AlertSeverity::Error);
/// assert_eq!(alert.regulation_ref, "CE 561/2006 art. 6.2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// The rule that raised the alert.
    pub code: AlertCode,
    /// How serious the alert is.
    pub severity: AlertSeverity,
    /// Human-readable description.
    pub message: String,
    /// The provision the rule comes from.
    pub regulation_ref: String,
    /// The measured value, when numeric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    /// The limit the value was compared against, when numeric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Decimal>,
}

impl Alert {
    fn new(code: AlertCode, severity: AlertSeverity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            regulation_ref: code.regulation_ref().to_string(),
            value: None,
            limit: None,
        }
    }

    /// Creates an error-severity alert.
    pub fn error(code: AlertCode, message: impl Into<String>) -> Self {
        Self::new(code, AlertSeverity::Error, message)
    }

    /// Creates a warning-severity alert.
    pub fn warning(code: AlertCode, message: impl Into<String>) -> Self {
        Self::new(code, AlertSeverity::Warning, message)
    }

    /// Creates an info-severity alert.
    pub fn info(code: AlertCode, message: impl Into<String>) -> Self {
        Self::new(code, AlertSeverity::Info, message)
    }

    /// Attaches the measured value and the limit it was compared with.
    pub fn with_values(mut self, value: Decimal, limit: Decimal) -> Self {
        self.value = Some(value);
        self.limit = Some(limit);
        self
    }

    /// Returns true if the alert blocks the day.
    pub fn is_error(&self) -> bool {
        self.severity == AlertSeverity::Error
    }
}
