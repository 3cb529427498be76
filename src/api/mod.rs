//! HTTP API module for the salary engine.
//!
//! This module provides the REST endpoints for single-regime calculations,
//! regime comparisons and listing the loaded regimes.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, ComparisonRequest};
pub use response::{ApiError, ApiErrorResponse, RegimeSummary};
pub use state::AppState;
