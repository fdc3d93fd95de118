//! Background tasks module
//! 
//! This module contains the tasks that run alongside the HTTP server. There is
//! no timer ticker: the countdown is derived on every read.

pub mod operator_shell;

// Re-export main functions
pub use operator_shell::{spawn_operator_shell, wait_for_exit_command, ShellEvent};
