//! HTTP request handlers for the salary engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_all, compare_regimes};

use super::request::{CalculationRequest, ComparisonRequest};
use super::response::{ApiError, ApiErrorResponse, RegimeSummary};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/compare", post(compare_handler))
        .route("/regimes", get(regimes_handler))
        .with_state(state)
}

/// Handler for POST /calculate.
///
/// Validates the request, runs the calculation for the named regime and
/// returns the full [`CalculationResult`](crate::models::CalculationResult).
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let config = state.config().config();
    let inputs = match request.into_inputs(config) {
        Ok(inputs) => inputs,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Request validation failed");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let start_time = Instant::now();
    let allowance = request.resolved_allowance(config.settings());
    match calculate_all(&inputs, allowance, config.settings()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                regime = %request.regime,
                region = %request.region,
                gross = %request.gross,
                final_net = %result.final_net,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_ok(result)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Calculation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /compare.
///
/// Runs the configured baseline and proposed regimes on the same inputs and
/// returns both results with their deltas.
async fn compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComparisonRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing comparison request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let inputs = match request.into_inputs() {
        Ok(inputs) => inputs,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Request validation failed");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let config = state.config().config();
    let allowance = request.resolved_allowance(config.settings());
    let start_time = Instant::now();
    match compare_regimes(&inputs, allowance, config) {
        Ok(comparison) => {
            info!(
                correlation_id = %correlation_id,
                baseline = comparison.baseline.inputs.regime.id(),
                proposed = comparison.proposed.inputs.regime.id(),
                net_delta = %comparison.deltas.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Comparison completed successfully"
            );
            json_ok(comparison)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Comparison failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /regimes.
async fn regimes_handler(State(state): State<AppState>) -> Json<Vec<RegimeSummary>> {
    let regimes = state
        .config()
        .config()
        .regimes()
        .iter()
        .map(RegimeSummary::from)
        .collect();
    Json(regimes)
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure onto the error envelope.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message, e.g. "missing field `gross`" or "unknown variant `V`"
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse::bad_request(error).into_response()
}
