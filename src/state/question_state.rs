//! The question record and its wire representation

use std::{fmt, str::FromStr, time::Duration};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Text forced onto the record once it reaches the terminal type
pub const END_TEXT: &str = "END";

/// Display mode of the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Pomoc,
    Rozstrel,
    Waiting,
    End,
}

impl QuestionType {
    /// Every accepted type, in the order the operator help lists them
    pub const ALL: [QuestionType; 4] = [
        QuestionType::Pomoc,
        QuestionType::Rozstrel,
        QuestionType::Waiting,
        QuestionType::End,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Pomoc => "pomoc",
            QuestionType::Rozstrel => "rozstrel",
            QuestionType::Waiting => "waiting",
            QuestionType::End => "end",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, QuestionType::End)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownType(s.to_string()))
    }
}

/// The single process-wide question record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionState {
    /// Display text, `"END"` once the type is terminal
    #[serde(rename = "question")]
    pub text: String,
    /// Countdown budget, unused in count-up mode
    #[serde(rename = "time_left", with = "seconds")]
    pub duration_budget: Duration,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(rename = "start_time")]
    pub started_at: DateTime<Utc>,
    pub count_up: bool,
}

impl QuestionState {
    /// Create a countdown record starting at `now`
    pub fn new(text: impl Into<String>, duration_budget: Duration, kind: QuestionType, now: DateTime<Utc>) -> Self {
        let mut state = Self {
            text: text.into(),
            duration_budget,
            kind,
            started_at: now,
            count_up: false,
        };
        state.normalize();
        state
    }

    /// Enforce the terminal-type text rule
    pub fn normalize(&mut self) {
        if self.kind.is_terminal() {
            self.text = END_TEXT.to_string();
        }
    }
}

/// Incoming body of `POST /set-question`, checked before it reaches the store
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionPayload {
    #[serde(default)]
    pub question: String,
    /// Seconds
    #[serde(default)]
    pub time_left: f64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub count_up: bool,
}

impl QuestionPayload {
    /// Validate the payload into a record that starts at `now`.
    ///
    /// Any submitted `start_time` is ignored: accepting a question always
    /// restarts its timer.
    pub fn validate(self, now: DateTime<Utc>) -> Result<QuestionState, ValidationError> {
        if self.time_left < 0.0 {
            return Err(ValidationError::NegativeDuration);
        }
        let duration_budget =
            Duration::try_from_secs_f64(self.time_left).map_err(|_| ValidationError::InvalidDuration)?;
        let kind: QuestionType = self.kind.parse()?;

        let mut state = QuestionState::new(self.question, duration_budget, kind, now);
        state.count_up = self.count_up;
        Ok(state)
    }
}

/// Serialize a `Duration` as fractional seconds
pub(crate) mod seconds {
    use std::time::Duration;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }
}
