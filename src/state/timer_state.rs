//! Live timer projection of the stored question

use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::question_state::{seconds, QuestionState, QuestionType};

/// What display clients and the operator see at a given instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    pub question: String,
    /// Remaining time in countdown mode, elapsed time in count-up mode
    #[serde(with = "seconds")]
    pub time_left: Duration,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub start_time: DateTime<Utc>,
    pub count_up: bool,
}

impl DisplayState {
    fn verbatim(state: &QuestionState) -> Self {
        Self {
            question: state.text.clone(),
            time_left: state.duration_budget,
            kind: state.kind,
            start_time: state.started_at,
            count_up: state.count_up,
        }
    }

    /// Whole seconds, truncated, as the operator console shows them
    pub fn whole_seconds(&self) -> u64 {
        self.time_left.as_secs()
    }
}

/// Time passed since `started_at`, zero if `now` lies before it
pub fn elapsed_since(started_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - started_at).to_std().unwrap_or(Duration::ZERO)
}

/// Derive the display state of `state` at `now`.
///
/// `frozen` is the timer value captured by a pause; while it is set the stored
/// fields are reported verbatim with that value and no time math happens. An
/// exhausted countdown reports zero and the terminal type, without touching
/// the stored record.
pub fn derive(state: &QuestionState, now: DateTime<Utc>, frozen: Option<Duration>) -> DisplayState {
    let mut display = DisplayState::verbatim(state);
    if let Some(frozen) = frozen {
        display.time_left = frozen;
        return display;
    }

    let elapsed = elapsed_since(state.started_at, now);
    if state.count_up {
        display.time_left = elapsed;
    } else {
        display.time_left = state.duration_budget.saturating_sub(elapsed);
        if display.time_left.is_zero() {
            display.kind = QuestionType::End;
        }
    }
    display
}
