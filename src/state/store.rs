//! Lock-guarded container for the question record, the pause state and the
//! remembered manual duration

use std::{sync::RwLock, time::Duration};
use chrono::{DateTime, Utc};

use super::{
    question_state::{QuestionPayload, QuestionState, QuestionType},
    timer_state::{derive, DisplayState},
};
use crate::error::{StoreError, ValidationError};

/// Consistent copy of everything the store guards
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub question: QuestionState,
    /// Timer value captured when the operator paused, `None` while running.
    /// The stored record keeps its operator-set budget either way.
    pub frozen: Option<Duration>,
    pub last_manual_seconds: u64,
}

impl Snapshot {
    pub fn is_paused(&self) -> bool {
        self.frozen.is_some()
    }

    pub fn display_at(&self, now: DateTime<Utc>) -> DisplayState {
        derive(&self.question, now, self.frozen)
    }

    /// Restart the clock at `now`. A paused timer stays paused, frozen at the
    /// fresh starting value.
    fn restart_timer(&mut self, now: DateTime<Utc>) {
        self.question.started_at = now;
        if self.is_paused() {
            self.frozen = Some(initial_value(&self.question));
        }
    }

    /// Resume from the frozen value: shift the start back by the time that had
    /// already run so reads continue where the pause left them.
    fn resume(&mut self, now: DateTime<Utc>) {
        let Some(frozen) = self.frozen.take() else {
            return;
        };
        let ran = if self.question.count_up {
            frozen
        } else {
            self.question.duration_budget.saturating_sub(frozen)
        };
        self.question.started_at = chrono::Duration::from_std(ran)
            .ok()
            .and_then(|ran| now.checked_sub_signed(ran))
            .unwrap_or(now);
    }
}

/// Timer value of a freshly started record
fn initial_value(question: &QuestionState) -> Duration {
    if question.count_up {
        Duration::ZERO
    } else {
        question.duration_budget
    }
}

/// A field-level change to the stored record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// Replace the text and restart the timer
    Text(String),
    /// Start a countdown of `seconds`, remembered for [`Patch::RestoreLastCountdown`]
    Countdown { seconds: u64 },
    /// Restart a countdown from the remembered manual duration
    RestoreLastCountdown,
    /// Freeze or resume the perceived timer
    TogglePause,
    /// Switch to counting up from now
    CountUp,
    /// Change the display type
    Kind(QuestionType),
}

impl Patch {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Patch::Text(text) if text.trim().is_empty() => Err(ValidationError::EmptyText),
            _ => Ok(()),
        }
    }
}

/// The only owner of the question record.
///
/// Readers share the lock; every mutation happens inside one write-lock
/// section so no reader sees fields from two different writes.
#[derive(Debug)]
pub struct StateStore {
    inner: RwLock<Snapshot>,
}

impl StateStore {
    /// Create the store around the startup record
    pub fn new(question: QuestionState, last_manual_seconds: u64) -> Self {
        Self {
            inner: RwLock::new(Snapshot {
                question,
                frozen: None,
                last_manual_seconds,
            }),
        }
    }

    /// Copy the guarded state under the read lock
    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        self.inner
            .read()
            .map(|inner| inner.clone())
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    /// Copy only the stored question record
    pub fn question(&self) -> Result<QuestionState, StoreError> {
        self.inner
            .read()
            .map(|inner| inner.question.clone())
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    /// Live projection at `now`
    pub fn display_at(&self, now: DateTime<Utc>) -> Result<DisplayState, StoreError> {
        Ok(self.snapshot()?.display_at(now))
    }

    /// Replace the whole record. Returns the stored, normalized record.
    pub fn replace(&self, mut question: QuestionState) -> Result<QuestionState, StoreError> {
        question.normalize();
        let mut inner = self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        let started_at = question.started_at;
        inner.question = question;
        inner.restart_timer(started_at);
        Ok(inner.question.clone())
    }

    /// Validate an incoming payload and, if it passes, replace the record with
    /// it. A rejected payload leaves the store untouched.
    pub fn replace_from(&self, payload: QuestionPayload, now: DateTime<Utc>) -> Result<QuestionState, StoreError> {
        let question = payload.validate(now)?;
        self.replace(question)
    }

    /// Apply one patch atomically and return the state it committed
    pub fn apply(&self, patch: Patch, now: DateTime<Utc>) -> Result<Snapshot, StoreError> {
        patch.validate()?;

        let mut inner = self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;

        match patch {
            Patch::Text(text) => {
                inner.question.text = text;
                inner.restart_timer(now);
            }
            Patch::Countdown { seconds } => {
                inner.last_manual_seconds = seconds;
                start_countdown(&mut inner, Duration::from_secs(seconds), now);
            }
            Patch::RestoreLastCountdown => {
                let seconds = inner.last_manual_seconds;
                start_countdown(&mut inner, Duration::from_secs(seconds), now);
            }
            Patch::TogglePause => {
                if inner.is_paused() {
                    inner.resume(now);
                } else {
                    inner.frozen = Some(derive(&inner.question, now, None).time_left);
                }
            }
            Patch::CountUp => {
                inner.question.count_up = true;
                inner.restart_timer(now);
            }
            Patch::Kind(kind) => {
                inner.question.kind = kind;
            }
        }
        inner.question.normalize();

        Ok(inner.clone())
    }
}

fn start_countdown(inner: &mut Snapshot, budget: Duration, now: DateTime<Utc>) {
    inner.question.duration_budget = budget;
    inner.question.count_up = false;
    inner.restart_timer(now);
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;

    use super::*;
    use crate::state::question_state::END_TEXT;

    fn store_at(start: DateTime<Utc>) -> StateStore {
        StateStore::new(
            QuestionState::new("Default question", Duration::from_secs(30), QuestionType::Pomoc, start),
            30,
        )
    }

    fn secs(n: i64) -> ChronoDuration {
        ChronoDuration::seconds(n)
    }

    #[test]
    fn text_patch_restarts_timer() {
        let start = Utc::now();
        let store = store_at(start);

        let committed = store.apply(Patch::Text("Q2".to_string()), start + secs(10)).unwrap();
        assert_eq!(committed.question.text, "Q2");
        assert_eq!(committed.question.started_at, start + secs(10));
    }

    #[test]
    fn empty_text_is_rejected() {
        let start = Utc::now();
        let store = store_at(start);
        let before = store.snapshot().unwrap();

        let err = store.apply(Patch::Text("   ".to_string()), start).unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::EmptyText)));
        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[test]
    fn countdown_is_remembered_and_restored() {
        let start = Utc::now();
        let store = store_at(start);

        store.apply(Patch::Countdown { seconds: 45 }, start).unwrap();
        store.apply(Patch::Countdown { seconds: 0 }, start + secs(1)).unwrap();
        assert_eq!(store.snapshot().unwrap().last_manual_seconds, 0);

        store.apply(Patch::Countdown { seconds: 45 }, start + secs(2)).unwrap();
        store.apply(Patch::CountUp, start + secs(3)).unwrap();
        let committed = store.apply(Patch::RestoreLastCountdown, start + secs(20)).unwrap();

        assert!(!committed.question.count_up);
        assert_eq!(committed.question.duration_budget, Duration::from_secs(45));
        assert_eq!(committed.question.started_at, start + secs(20));
    }

    #[test]
    fn end_type_forces_text_and_sticks() {
        let start = Utc::now();
        let store = store_at(start);

        let committed = store.apply(Patch::Kind(QuestionType::End), start).unwrap();
        assert_eq!(committed.question.text, END_TEXT);

        let committed = store.apply(Patch::Text("late text".to_string()), start).unwrap();
        assert_eq!(committed.question.text, END_TEXT);
    }

    #[test]
    fn kind_patch_keeps_start_time() {
        let start = Utc::now();
        let store = store_at(start);

        let committed = store.apply(Patch::Kind(QuestionType::Waiting), start + secs(5)).unwrap();
        assert_eq!(committed.question.started_at, start);
    }

    #[test]
    fn rejected_replace_leaves_record_identical() {
        let start = Utc::now();
        let store = store_at(start);
        let before = store.snapshot().unwrap();

        let negative = QuestionPayload {
            question: "x".to_string(),
            time_left: -5.0,
            kind: "pomoc".to_string(),
            count_up: false,
        };
        assert!(store.replace_from(negative, start + secs(1)).is_err());

        let unknown = QuestionPayload {
            question: "x".to_string(),
            time_left: 5.0,
            kind: "finale".to_string(),
            count_up: false,
        };
        assert!(store.replace_from(unknown, start + secs(1)).is_err());

        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[test]
    fn pause_freezes_countdown() {
        let start = Utc::now();
        let store = store_at(start);

        store.apply(Patch::TogglePause, start + secs(10)).unwrap();
        let a = store.display_at(start + secs(11)).unwrap();
        let b = store.display_at(start + secs(500)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.time_left, Duration::from_secs(20));

        let stored = store.question().unwrap();
        assert_eq!(stored.started_at, start);
        assert_eq!(stored.duration_budget, Duration::from_secs(30));
    }

    #[test]
    fn resume_continues_countdown_from_remaining_time() {
        let start = Utc::now();
        let store = store_at(start);

        // 10s run, 15s paused, then 5s more
        store.apply(Patch::TogglePause, start + secs(10)).unwrap();
        store.apply(Patch::TogglePause, start + secs(25)).unwrap();

        let display = store.display_at(start + secs(30)).unwrap();
        assert_eq!(display.time_left, Duration::from_secs(15));

        let snapshot = store.snapshot().unwrap();
        assert!(!snapshot.is_paused());
        assert_eq!(snapshot.question.duration_budget, Duration::from_secs(30));
    }

    #[test]
    fn resume_continues_count_up_from_elapsed_time() {
        let start = Utc::now();
        let store = store_at(start);
        store.apply(Patch::CountUp, start).unwrap();

        store.apply(Patch::TogglePause, start + secs(8)).unwrap();
        assert_eq!(store.display_at(start + secs(60)).unwrap().time_left, Duration::from_secs(8));

        store.apply(Patch::TogglePause, start + secs(60)).unwrap();
        assert_eq!(store.display_at(start + secs(62)).unwrap().time_left, Duration::from_secs(10));
    }

    #[test]
    fn new_countdown_while_paused_resumes_from_full_budget() {
        let start = Utc::now();
        let store = store_at(start);

        store.apply(Patch::TogglePause, start + secs(10)).unwrap();
        store.apply(Patch::Countdown { seconds: 60 }, start + secs(12)).unwrap();
        assert_eq!(store.display_at(start + secs(40)).unwrap().time_left, Duration::from_secs(60));

        store.apply(Patch::TogglePause, start + secs(40)).unwrap();
        assert_eq!(store.display_at(start + secs(50)).unwrap().time_left, Duration::from_secs(50));
    }

    #[test]
    fn question_after_pause_and_resume_gets_full_budget() {
        let start = Utc::now();
        let store = store_at(start);
        store.apply(Patch::Countdown { seconds: 60 }, start).unwrap();

        store.apply(Patch::TogglePause, start + secs(20)).unwrap();
        store.apply(Patch::TogglePause, start + secs(30)).unwrap();
        let committed = store.apply(Patch::Text("Next".to_string()), start + secs(40)).unwrap();

        assert_eq!(committed.question.duration_budget, Duration::from_secs(60));
        assert_eq!(store.display_at(start + secs(40)).unwrap().time_left, Duration::from_secs(60));
    }

    #[test]
    fn question_while_count_up_paused_restarts_from_zero() {
        let start = Utc::now();
        let store = store_at(start);
        store.apply(Patch::CountUp, start).unwrap();

        store.apply(Patch::TogglePause, start + secs(8)).unwrap();
        let committed = store.apply(Patch::Text("Next".to_string()), start + secs(10)).unwrap();
        assert_eq!(committed.frozen, Some(Duration::ZERO));
        assert_eq!(store.display_at(start + secs(11)).unwrap().time_left, Duration::ZERO);

        store.apply(Patch::TogglePause, start + secs(12)).unwrap();
        assert_eq!(store.display_at(start + secs(12)).unwrap().time_left, Duration::ZERO);
        assert_eq!(store.display_at(start + secs(15)).unwrap().time_left, Duration::from_secs(3));
    }

    #[test]
    fn count_up_keeps_budget_for_time_last() {
        let start = Utc::now();
        let store = store_at(start);

        let committed = store.apply(Patch::CountUp, start + secs(1)).unwrap();
        assert_eq!(committed.question.duration_budget, Duration::from_secs(30));
        assert!(committed.question.count_up);
    }

    #[test]
    fn replace_while_paused_stays_paused_at_new_budget() {
        let start = Utc::now();
        let store = store_at(start);
        store.apply(Patch::TogglePause, start + secs(10)).unwrap();

        let payload = QuestionPayload {
            question: "Q9".to_string(),
            time_left: 45.0,
            kind: "rozstrel".to_string(),
            count_up: false,
        };
        store.replace_from(payload, start + secs(12)).unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.frozen, Some(Duration::from_secs(45)));
        assert_eq!(store.display_at(start + secs(100)).unwrap().time_left, Duration::from_secs(45));
    }
}
