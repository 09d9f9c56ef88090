//! HTTP request handlers for the compliance API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::compliance::UpsertStatus;
use crate::error::ComplianceError;

use super::request::{AsOfQuery, DateRangeQuery, UpsertDayRequest, ValidateDayRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/days/validate", post(validate_day_handler))
        .route("/drivers/:driver_id/days", get(list_days_handler))
        .route(
            "/drivers/:driver_id/days/:date",
            put(upsert_day_handler).delete(delete_day_handler),
        )
        .route("/drivers/:driver_id/compliance", get(compliance_handler))
        .route(
            "/drivers/:driver_id/rest-balance/:year/:month",
            get(rest_balance_handler),
        )
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON body rejection to a 400 response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn path_rejection(correlation_id: Uuid, rejection: PathRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Invalid path parameters");
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Invalid query string");
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
}

fn engine_failure(correlation_id: Uuid, error: ComplianceError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    error.into()
}

/// Handler for `POST /days/validate`.
///
/// Validates a proposed day without writing it.
async fn validate_day_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidateDayRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validation request");

    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    if request.driver_id.trim().is_empty() {
        warn!(correlation_id = %correlation_id, "Empty driver id");
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            "driver_id must not be empty",
        )));
    }

    let start_time = Instant::now();
    let result = state
        .service()
        .validate_day(&request.driver_id, &request.proposal())
        .map_err(|e| engine_failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        driver_id = %request.driver_id,
        date = %request.date,
        valid = result.valid,
        alerts = result.alerts.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Validation completed"
    );
    Ok(json_response(StatusCode::OK, result))
}

/// Handler for `PUT /drivers/:driver_id/days/:date`.
///
/// Responds 200 when the day is saved and 422 with the outcome when it is
/// rejected.
async fn upsert_day_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, NaiveDate)>, PathRejection>,
    payload: Result<Json<UpsertDayRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path((driver_id, date)) = path.map_err(|r| path_rejection(correlation_id, r))?;
    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;

    let force = request.force;
    let start_time = Instant::now();
    let outcome = state
        .service()
        .upsert_day(request.into_record(driver_id, date), force, correlation_id)
        .map_err(|e| engine_failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        driver_id = %outcome.record.driver_id,
        date = %date,
        status = ?outcome.status,
        forced = force,
        duration_us = start_time.elapsed().as_micros(),
        "Day upsert completed"
    );

    let status = match outcome.status {
        UpsertStatus::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
        UpsertStatus::Created | UpsertStatus::Updated => StatusCode::OK,
    };
    Ok(json_response(status, outcome))
}

/// Handler for `DELETE /drivers/:driver_id/days/:date`.
async fn delete_day_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, NaiveDate)>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path((driver_id, date)) = path.map_err(|r| path_rejection(correlation_id, r))?;

    let removed = state
        .service()
        .delete_day(&driver_id, date)
        .map_err(|e| engine_failure(correlation_id, e))?;
    if !removed {
        return Err(engine_failure(
            correlation_id,
            ComplianceError::RecordNotFound { driver_id, date },
        ));
    }

    info!(correlation_id = %correlation_id, driver_id = %driver_id, date = %date, "Day deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for `GET /drivers/:driver_id/days?from=&to=`.
async fn list_days_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path(driver_id) = path.map_err(|r| path_rejection(correlation_id, r))?;
    let Query(range) = query.map_err(|r| query_rejection(correlation_id, r))?;

    if range.from > range.to {
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            format!("from ({}) is after to ({})", range.from, range.to),
        )));
    }

    let records = state
        .service()
        .list_days(&driver_id, range.from, range.to)
        .map_err(|e| engine_failure(correlation_id, e))?;
    info!(
        correlation_id = %correlation_id,
        driver_id = %driver_id,
        records = records.len(),
        "Listed days"
    );
    Ok(json_response(StatusCode::OK, records))
}

/// Handler for `GET /drivers/:driver_id/compliance?as_of=`.
async fn compliance_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<AsOfQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path(driver_id) = path.map_err(|r| path_rejection(correlation_id, r))?;
    let Query(query) = query.map_err(|r| query_rejection(correlation_id, r))?;
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let summary = state
        .service()
        .compliance_summary(&driver_id, as_of)
        .map_err(|e| engine_failure(correlation_id, e))?;
    info!(
        correlation_id = %correlation_id,
        driver_id = %driver_id,
        as_of = %as_of,
        streak = summary.streak_report.consecutive_days,
        urgency = ?summary.streak_report.urgency,
        "Compliance summary computed"
    );
    Ok(json_response(StatusCode::OK, summary))
}

/// Handler for `GET /drivers/:driver_id/rest-balance/:year/:month`.
async fn rest_balance_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, i32, u32)>, PathRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path((driver_id, year, month)) = path.map_err(|r| path_rejection(correlation_id, r))?;

    let balance = state
        .service()
        .monthly_rest_balance(&driver_id, year, month)
        .map_err(|e| engine_failure(correlation_id, e))?;
    info!(
        correlation_id = %correlation_id,
        driver_id = %driver_id,
        year,
        month,
        owed = balance.rests_owed,
        pending = balance.pending,
        "Rest balance computed"
    );
    Ok(json_response(StatusCode::OK, balance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::{body::Body, http::Request};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/es").expect("Failed to load config");
        AppState::in_memory(config)
    }

    async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_validate_returns_200() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "POST",
            "/days/validate",
            Some(json!({
                "driver_id": "drv_001",
                "date": "2026-03-02",
                "driving_hours": "8",
                "working_hours": "9"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["stats"]["weekly_driving"], "8");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/days/validate")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "POST",
            "/days/validate",
            Some(json!({ "date": "2026-03-02", "driving_hours": "8", "working_hours": "9" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("driver_id"));
    }

    #[tokio::test]
    async fn test_blank_driver_id_returns_validation_error() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "POST",
            "/days/validate",
            Some(json!({
                "driver_id": "  ",
                "date": "2026-03-02",
                "driving_hours": "8",
                "working_hours": "9"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_bad_path_date_returns_validation_error() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "PUT",
            "/drivers/drv_001/days/2026-02-30",
            Some(json!({ "day_type": "work" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_inverted_range_returns_validation_error() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            "GET",
            "/drivers/drv_001/days?from=2026-03-10&to=2026-03-01",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_month_returns_400() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, "GET", "/drivers/drv_001/rest-balance/2026/13", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_PERIOD");
    }
}
