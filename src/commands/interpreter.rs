//! Applies operator input lines to the shared state

use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::{debug, error};

use super::{
    grammar::help_lines,
    parser::{parse_command, split_commands, Command, ParseError, TimeArg},
};
use crate::state::{AppState, Snapshot};

/// How a reply should be presented to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Success,
    Info,
    Error,
}

/// One line of feedback for the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub text: String,
}

impl Reply {
    fn success(text: impl Into<String>) -> Self {
        Self { kind: ReplyKind::Success, text: text.into() }
    }

    fn info(text: impl Into<String>) -> Self {
        Self { kind: ReplyKind::Info, text: text.into() }
    }

    fn error(text: impl Into<String>) -> Self {
        Self { kind: ReplyKind::Error, text: text.into() }
    }
}

/// Result of running one input line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Execution {
    pub replies: Vec<Reply>,
    /// Set when the line contained `exit`; commands after it were not run
    pub exit: bool,
}

/// Interpreter for the operator command language
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    state: Arc<AppState>,
}

impl CommandInterpreter {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Run a line against the wall clock
    pub fn execute_line(&self, line: &str) -> Execution {
        self.execute_line_at(line, Utc::now())
    }

    /// Run every `;`-separated command of `line` in order, as of `now`.
    ///
    /// A failing command is reported and skipped; the rest still run.
    pub fn execute_line_at(&self, line: &str, now: DateTime<Utc>) -> Execution {
        let mut execution = Execution::default();

        for segment in split_commands(line) {
            debug!("Operator command: {}", segment);
            match parse_command(segment) {
                Ok(Command::Exit) => {
                    execution.replies.push(Reply::success("Shutting down server..."));
                    execution.exit = true;
                    break;
                }
                Ok(command) => self.run(command, now, &mut execution.replies),
                Err(e @ ParseError::UnknownCommand(_)) => {
                    execution.replies.push(Reply::error(e.to_string()));
                    execution.replies.push(Reply::error("Type 'help' for available commands"));
                }
                Err(e) => execution.replies.push(Reply::error(e.to_string())),
            }
        }

        execution
    }

    fn run(&self, command: Command, now: DateTime<Utc>, replies: &mut Vec<Reply>) {
        if let Some(patch) = command.patch() {
            match self.state.update_question(patch, now) {
                Ok(committed) => replies.push(Reply::success(confirmation(&command, &committed))),
                Err(e) => {
                    error!("Operator command '{:?}' failed: {}", command, e);
                    replies.push(Reply::error(e.to_string()));
                }
            }
            return;
        }

        match command {
            Command::Status => match self.state.store.snapshot() {
                Ok(snapshot) => replies.extend(self.status(&snapshot, now)),
                Err(e) => replies.push(Reply::error(e.to_string())),
            },
            Command::Logging(enabled) => {
                self.state.set_request_logging(enabled);
                replies.push(Reply::success(if enabled {
                    "Request logging enabled"
                } else {
                    "Request logging disabled"
                }));
            }
            Command::Help => replies.extend(help_lines().into_iter().map(Reply::info)),
            _ => {}
        }
    }

    fn status(&self, snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<Reply> {
        let display = snapshot.display_at(now);
        let timer = if display.count_up {
            format!("Elapsed time: {} seconds", display.whole_seconds())
        } else {
            format!("Time left: {} seconds", display.whole_seconds())
        };

        vec![
            Reply::info("Current question status:"),
            Reply::info(format!("Question: {}", display.question)),
            Reply::info(timer),
            Reply::info(format!("Type: {}", display.kind)),
            Reply::info(format!("Paused: {}", snapshot.is_paused())),
            Reply::info(format!("Logging: {}", self.state.request_logging_enabled())),
        ]
    }
}

fn confirmation(command: &Command, committed: &Snapshot) -> String {
    match command {
        Command::Question(_) => format!("Question set to: {}", committed.question.text),
        Command::Time(TimeArg::Seconds(seconds)) => format!("Time left set to: {} seconds", seconds),
        Command::Time(TimeArg::Last) => {
            format!("Time left set to: {} seconds", committed.last_manual_seconds)
        }
        Command::Time(TimeArg::Pause) if committed.is_paused() => "Question paused".to_string(),
        Command::Time(TimeArg::Pause) => "Question unpaused".to_string(),
        Command::Time(TimeArg::CountUp) => "Counting up".to_string(),
        Command::Type(kind) => format!("Type set to: {}", kind),
        _ => String::new(),
    }
}
