//! HTTP request handlers for the salary engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calcular_sueldo;
use crate::models::SueldoInput;

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calcular", post(calcular_handler))
        .with_state(state)
}

/// Handler for POST /calcular endpoint.
///
/// Accepts a salary input and returns the full calculation result.
async fn calcular_handler(
    State(state): State<AppState>,
    payload: Result<Json<SueldoInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary calculation request");

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Rejected request body"
            );
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::malformed_json(body_text),
            }
            .into_response();
        }
    };

    let start_time = Instant::now();
    match calcular_sueldo(&input, state.provider()) {
        Ok(resultado) => {
            info!(
                correlation_id = %correlation_id,
                fecha = %resultado.fecha,
                sueldo_liquido = %resultado.sueldo_liquido,
                costo_total = %resultado.empleador.costo_total,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(resultado),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                code = err.code(),
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}
