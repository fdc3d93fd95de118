//! Outbound notifications to the question-bank service

use std::{sync::Arc, time::Duration};
use tokio::{runtime::Handle, sync::watch, task::JoinHandle, time::timeout};
use tracing::{debug, info, warn};

use crate::state::QuestionState;

/// Path the question bank accepts the current question on
pub const SET_CURRENT_QUESTION_PATH: &str = "/set-current-question";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The question bank lives on the local network, so proxies are bypassed
fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to build HTTP client ({}), using defaults", e);
            reqwest::Client::new()
        })
}

/// Best-effort poster of the current question.
///
/// Each notification runs as a detached task on the runtime that created the
/// notifier, so callers on the blocking shell thread can use it too.
#[derive(Debug, Clone)]
pub struct QuestionBankNotifier {
    client: reqwest::Client,
    endpoint: Option<String>,
    runtime: Option<Handle>,
    /// Posts spawned but not yet finished
    in_flight: Arc<watch::Sender<usize>>,
}

impl QuestionBankNotifier {
    /// Notifier posting to `<base_url>/set-current-question`
    pub fn new(base_url: &str) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), SET_CURRENT_QUESTION_PATH);
        let runtime = Handle::try_current().ok();
        if runtime.is_none() {
            warn!("No async runtime available, question bank notifications disabled");
        }

        Self {
            client: build_client(),
            endpoint: Some(endpoint),
            runtime,
            in_flight: Arc::new(watch::Sender::new(0)),
        }
    }

    /// Notifier that drops every notification
    pub fn disabled() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: None,
            runtime: None,
            in_flight: Arc::new(watch::Sender::new(0)),
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Fire-and-forget: spawn the POST and return immediately
    pub fn notify(&self, question: QuestionState) -> Option<JoinHandle<()>> {
        let runtime = self.runtime.as_ref()?;
        if self.endpoint.is_none() {
            return None;
        }

        let notifier = self.clone();
        self.in_flight.send_modify(|n| *n += 1);
        Some(runtime.spawn(async move {
            if let Err(e) = notifier.send(&question).await {
                warn!("Question bank notification failed: {}", e);
            }
            notifier.in_flight.send_modify(|n| *n = n.saturating_sub(1));
        }))
    }

    /// Wait up to `limit` for spawned notifications to finish. Returns
    /// `false` if some were still running when the limit passed.
    pub async fn flush(&self, limit: Duration) -> bool {
        let mut pending = self.in_flight.subscribe();
        let done = matches!(timeout(limit, pending.wait_for(|n| *n == 0)).await, Ok(Ok(_)));
        done
    }

    /// Post `question` once, without retry
    pub async fn send(&self, question: &QuestionState) -> Result<(), String> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return Ok(());
        };
        debug!("Posting current question to {}", endpoint);

        let response = self.client
            .post(endpoint)
            .json(question)
            .send()
            .await
            .map_err(|e| format!("Error sending POST request: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Failed to send question, status code: {}", status.as_u16()));
        }

        info!("Question bank notified: '{}'", question.text);
        Ok(())
    }
}
