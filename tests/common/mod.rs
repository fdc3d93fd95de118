//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::{sync::Arc, time::Duration};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use quizcast::{
    services::QuestionBankNotifier,
    state::{AppState, QuestionState, QuestionType, StateStore},
};
use serde_json::Value;
use tower::ServiceExt;

pub fn app_state_with(notifier: QuestionBankNotifier, start: DateTime<Utc>) -> Arc<AppState> {
    let question = QuestionState::new("Default question", Duration::from_secs(30), QuestionType::Pomoc, start);
    Arc::new(AppState::new(
        StateStore::new(question, 30),
        notifier,
        8050,
        "127.0.0.1".to_string(),
    ))
}

pub fn app_state() -> Arc<AppState> {
    app_state_with(QuestionBankNotifier::disabled(), Utc::now())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub fn seconds(value: &Value) -> f64 {
    value.as_f64().expect("time_left should be a number")
}
