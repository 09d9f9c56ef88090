//! Response types for the compliance API.
//!
//! This module defines the error response structures and the mapping from
//! [`ComplianceError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::ComplianceError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<ComplianceError> for ApiErrorResponse {
    fn from(error: ComplianceError) -> Self {
        let message = error.to_string();
        match error {
            ComplianceError::Storage { message: cause } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Day record store failed", cause),
            },
            ComplianceError::InvalidRecord { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_RECORD",
                    message,
                    "The day record contains invalid information",
                ),
            },
            ComplianceError::RecordNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("RECORD_NOT_FOUND", message),
            },
            ComplianceError::InvalidPeriod { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PERIOD",
                    message,
                    "The month must be between 1 and 12",
                ),
            },
            ComplianceError::ConfigNotFound { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            ComplianceError::ConfigParseError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    message,
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_record_not_found_maps_to_404() {
        let error = ComplianceError::RecordNotFound {
            driver_id: "drv_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        };
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "RECORD_NOT_FOUND");
        assert!(response.error.message.contains("drv_001"));
    }

    #[test]
    fn test_storage_error_maps_to_500() {
        let response: ApiErrorResponse = ComplianceError::storage("disk full").into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "STORAGE_ERROR");
        assert_eq!(response.error.details.as_deref(), Some("disk full"));
    }

    #[test]
    fn test_invalid_period_maps_to_400() {
        let response: ApiErrorResponse =
            ComplianceError::InvalidPeriod { year: 2026, month: 13 }.into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_PERIOD");
    }
}
