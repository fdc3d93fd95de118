//! Parsing of operator input into typed commands

use thiserror::Error;

use crate::state::{Patch, QuestionType};

/// Sub-command of `time`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeArg {
    Seconds(u64),
    Last,
    Pause,
    CountUp,
}

/// One parsed operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Question(String),
    Time(TimeArg),
    Type(QuestionType),
    Status,
    Logging(bool),
    Help,
    Exit,
}

impl Command {
    /// The store mutation this command maps to, if it writes at all
    pub fn patch(&self) -> Option<Patch> {
        match self {
            Command::Question(text) => Some(Patch::Text(text.clone())),
            Command::Time(TimeArg::Seconds(seconds)) => Some(Patch::Countdown { seconds: *seconds }),
            Command::Time(TimeArg::Last) => Some(Patch::RestoreLastCountdown),
            Command::Time(TimeArg::Pause) => Some(Patch::TogglePause),
            Command::Time(TimeArg::CountUp) => Some(Patch::CountUp),
            Command::Type(kind) => Some(Patch::Kind(*kind)),
            Command::Status | Command::Logging(_) | Command::Help | Command::Exit => None,
        }
    }
}

/// Operator input that could not be turned into a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Time must be a non-negative integer")]
    InvalidTime,

    #[error("Invalid type. Must be: pomoc, rozstrel, waiting, or end")]
    InvalidType,

    #[error("Invalid option. Use 'on' or 'off'")]
    InvalidLoggingOption,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Split a line into its non-empty, trimmed `;`-separated segments
pub fn split_commands(line: &str) -> impl Iterator<Item = &str> {
    line.split(';').map(str::trim).filter(|segment| !segment.is_empty())
}

/// Parse one segment (no `;`) into a command
pub fn parse_command(segment: &str) -> Result<Command, ParseError> {
    let args: Vec<&str> = segment.split_whitespace().collect();
    let Some((&name, rest)) = args.split_first() else {
        return Err(ParseError::Usage("<command> [args]"));
    };

    match name {
        "question" => {
            if rest.is_empty() {
                return Err(ParseError::Usage("question <text>"));
            }
            Ok(Command::Question(rest.join(" ")))
        }
        "time" => {
            let [arg] = rest else {
                return Err(ParseError::Usage("time <seconds|last|pause|countUp>"));
            };
            let time = match *arg {
                "last" => TimeArg::Last,
                "pause" => TimeArg::Pause,
                "countUp" => TimeArg::CountUp,
                seconds => TimeArg::Seconds(seconds.parse().map_err(|_| ParseError::InvalidTime)?),
            };
            Ok(Command::Time(time))
        }
        "type" => {
            let [arg] = rest else {
                return Err(ParseError::Usage("type <pomoc/rozstrel/waiting/end>"));
            };
            arg.parse()
                .map(Command::Type)
                .map_err(|_| ParseError::InvalidType)
        }
        "logging" => {
            let [arg] = rest else {
                return Err(ParseError::Usage("logging <on/off>"));
            };
            match *arg {
                "on" => Ok(Command::Logging(true)),
                "off" => Ok(Command::Logging(false)),
                _ => Err(ParseError::InvalidLoggingOption),
            }
        }
        "status" => Ok(Command::Status),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}
