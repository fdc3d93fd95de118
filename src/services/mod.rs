//! External service integration module
//! 
//! This module contains the clients for collaborators outside the process,
//! currently the question-bank service.

pub mod question_bank;

// Re-export main types
pub use question_bank::{QuestionBankNotifier, SET_CURRENT_QUESTION_PATH};
