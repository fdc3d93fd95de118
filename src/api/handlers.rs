//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use tracing::{error, warn};

use crate::{
    error::StoreError,
    state::{AppState, DisplayState, QuestionPayload, QuestionState},
};
use super::{
    query::QueryService,
    responses::{ErrorResponse, HealthResponse},
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn store_error(e: StoreError) -> ApiError {
    let status = match e {
        StoreError::Validation(_) => {
            warn!("Rejected question update: {}", e);
            StatusCode::BAD_REQUEST
        }
        StoreError::Poisoned(_) => {
            error!("Question store unavailable: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(e.to_string())))
}

/// Handle GET /get-question - Return the live question projection
pub async fn get_question_handler(State(state): State<Arc<AppState>>) -> Result<Json<DisplayState>, ApiError> {
    QueryService::new(&state.store)
        .current()
        .map(Json)
        .map_err(store_error)
}

/// Handle POST /set-question - Replace the question record
pub async fn set_question_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuestionPayload>, JsonRejection>,
) -> Result<Json<QuestionState>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!("Rejected question body: {}", rejection.body_text());
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(rejection.body_text())))
    })?;

    state
        .set_question(payload, Utc::now())
        .map(Json)
        .map_err(store_error)
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime(), state.host.as_str(), state.port))
}
