//! Quizcast - A shared quiz question and timer broadcaster
//! 
//! This library holds the single current-question record, derives its live
//! countdown on every read, serves it over HTTP and lets an operator change it
//! from an interactive shell.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod commands;
pub mod services;
pub mod shell;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{StoreError, ValidationError};
pub use state::{AppState, StateStore};
pub use api::create_router;
pub use commands::CommandInterpreter;
pub use utils::signals::shutdown_signal;
