//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::state::QuestionType;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "quizcast")]
#[command(about = "Broadcasts the current quiz question and its timer over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "8050")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Base URL of the question-bank service notified on every change
    #[arg(long, default_value = "http://localhost:5000")]
    pub bank_url: String,

    /// Do not notify the question-bank service
    #[arg(long)]
    pub no_notify: bool,

    /// File the operator shell keeps its history in
    #[arg(long, default_value = "/tmp/quizcast_history")]
    pub history_file: PathBuf,

    /// Question text shown at startup
    #[arg(long, default_value = "Default question")]
    pub question: String,

    /// Countdown budget at startup, in seconds
    #[arg(short, long, default_value = "30")]
    pub time: u64,

    /// Question type at startup
    #[arg(long = "type", default_value = "pomoc", value_parser = parse_question_type)]
    pub kind: QuestionType,

    /// Seconds in-flight requests get to finish on shutdown
    #[arg(long, default_value = "10")]
    pub grace: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_question_type(value: &str) -> Result<QuestionType, String> {
    value.parse().map_err(|e: crate::error::ValidationError| e.to_string())
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Notification base URL, unless notifications are off
    pub fn notify_url(&self) -> Option<&str> {
        (!self.no_notify).then_some(self.bank_url.as_str())
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace)
    }
}
