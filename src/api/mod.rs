//! HTTP API module for the compliance engine.
//!
//! This module exposes day validation, day upserts and the driver
//! compliance views as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AsOfQuery, DateRangeQuery, UpsertDayRequest, ValidateDayRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
