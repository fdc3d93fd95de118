//! Main application state shared by the HTTP handlers and the operator shell

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{DisplayState, Patch, QuestionPayload, QuestionState, Snapshot, StateStore};
use crate::{error::StoreError, services::QuestionBankNotifier};

/// Composition root handle: the store plus the collaborators that react to it
#[derive(Debug)]
pub struct AppState {
    /// The single question record
    pub store: StateStore,
    /// Outbound notifications to the question bank
    pub notifier: QuestionBankNotifier,
    /// Whether the HTTP layer logs each request, shared with the trace layer
    pub request_logging: Arc<AtomicBool>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    pub fn new(store: StateStore, notifier: QuestionBankNotifier, port: u16, host: String) -> Self {
        Self {
            store,
            notifier,
            request_logging: Arc::new(AtomicBool::new(false)),
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Apply a patch and notify the question bank once it is committed
    pub fn update_question(&self, patch: Patch, now: DateTime<Utc>) -> Result<Snapshot, StoreError> {
        debug!("Applying patch: {:?}", patch);
        let committed = self.store.apply(patch, now)?;
        self.notifier.notify(committed.question.clone());
        Ok(committed)
    }

    /// Replace the record from an external payload and notify the question bank
    pub fn set_question(&self, payload: QuestionPayload, now: DateTime<Utc>) -> Result<QuestionState, StoreError> {
        let stored = self.store.replace_from(payload, now)?;
        info!("Question replaced: '{}' ({})", stored.text, stored.kind);
        self.notifier.notify(stored.clone());
        Ok(stored)
    }

    /// Live projection at `now`
    pub fn display_at(&self, now: DateTime<Utc>) -> Result<DisplayState, StoreError> {
        self.store.display_at(now)
    }

    pub fn set_request_logging(&self, enabled: bool) {
        self.request_logging.store(enabled, Ordering::Relaxed);
        info!("Request logging set to: {}", enabled);
    }

    pub fn request_logging_enabled(&self) -> bool {
        self.request_logging.load(Ordering::Relaxed)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
