//! HTTP API module
//! 
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod query;
pub mod responses;

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use axum::{
    http::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, OnResponse, TraceLayer},
};
use tracing::{info, Level, Span};

use crate::state::AppState;
use handlers::*;
pub use query::QueryService;

/// Response logger that only writes while the operator has logging turned on
#[derive(Debug, Clone)]
pub struct ToggledResponseLog {
    enabled: Arc<AtomicBool>,
}

impl ToggledResponseLog {
    pub fn new(enabled: Arc<AtomicBool>) -> Self {
        Self { enabled }
    }
}

impl<B> OnResponse<B> for ToggledResponseLog {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        if self.enabled.load(Ordering::Relaxed) {
            info!(status = response.status().as_u16(), latency_ms = latency.as_millis() as u64, "request served");
        }
    }
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(ToggledResponseLog::new(Arc::clone(&state.request_logging)));

    Router::new()
        .route("/get-question", get(get_question_handler))
        .route("/set-question", post(set_question_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(trace)
        .with_state(state)
}
