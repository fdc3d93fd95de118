//! State management module
//! 
//! This module contains the question record, its live timer projection and the
//! lock-guarded store that owns it.

pub mod question_state;
pub mod timer_state;
pub mod store;
pub mod app_state;

// Re-export main types
pub use question_state::{QuestionPayload, QuestionState, QuestionType, END_TEXT};
pub use timer_state::{derive, DisplayState};
pub use store::{Patch, Snapshot, StateStore};
pub use app_state::AppState;
