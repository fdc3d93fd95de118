//! Interactive operator shell
//! 
//! Line editing, history and tab completion around the command interpreter.

pub mod completion;

use std::path::PathBuf;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::FileHistory,
    validate::Validator,
    Context, Editor, Helper,
};
use tracing::{debug, error, info};

use crate::commands::{CommandInterpreter, Reply, ReplyKind};

const PROMPT: &str = "> ";

/// Why the shell loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    /// The operator asked to terminate the process
    Exit,
    /// Input closed (Ctrl-D, a closed stdin or a terminal error)
    EndOfInput,
}

/// rustyline helper providing grammar completion
pub struct ShellHelper;

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let completion = completion::complete(line, pos);
        let pairs = completion
            .candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: format!("{} ", candidate),
            })
            .collect();
        Ok((completion.start, pairs))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}

/// Blocking read-eval loop over the operator's terminal
pub struct OperatorShell {
    editor: Editor<ShellHelper, FileHistory>,
    interpreter: CommandInterpreter,
    history_file: PathBuf,
}

impl OperatorShell {
    /// Initialize the line editor and load history from `history_file`
    pub fn new(interpreter: CommandInterpreter, history_file: PathBuf) -> Result<Self, ReadlineError> {
        let mut editor = Editor::<ShellHelper, FileHistory>::new()?;
        editor.set_helper(Some(ShellHelper));
        if let Err(e) = editor.load_history(&history_file) {
            debug!("No shell history loaded from {}: {}", history_file.display(), e);
        }

        Ok(Self {
            editor,
            interpreter,
            history_file,
        })
    }

    /// Read and execute lines until `exit` or end of input
    pub fn run(mut self) -> ShellExit {
        println!("Server started. Type 'help' for available commands.");

        loop {
            let line = match self.editor.readline(PROMPT) {
                Ok(line) => line,
                Err(e) if !closes_shell(&e) => {
                    debug!("Prompt interrupted, line discarded");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    info!("Operator input closed");
                    self.save_history();
                    return ShellExit::EndOfInput;
                }
                Err(e) => {
                    error!("Error reading input: {}", e);
                    self.save_history();
                    return ShellExit::EndOfInput;
                }
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if let Err(e) = self.editor.add_history_entry(input) {
                debug!("Failed to record history entry: {}", e);
            }

            let execution = self.interpreter.execute_line(input);
            execution.replies.iter().for_each(print_reply);

            if execution.exit {
                self.save_history();
                return ShellExit::Exit;
            }
        }
    }

    fn save_history(&mut self) {
        if let Err(e) = self.editor.save_history(&self.history_file) {
            debug!("Failed to save shell history to {}: {}", self.history_file.display(), e);
        }
    }
}

/// Ctrl-C only drops the current line; anything else ends the loop
fn closes_shell(error: &ReadlineError) -> bool {
    !matches!(error, ReadlineError::Interrupted)
}

fn print_reply(reply: &Reply) {
    match reply.kind {
        ReplyKind::Error => eprintln!("{}", reply.text),
        ReplyKind::Success | ReplyKind::Info => println!("{}", reply.text),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn interrupt_keeps_the_shell_open() {
        assert!(!closes_shell(&ReadlineError::Interrupted));
    }

    #[test]
    fn end_of_input_and_read_errors_close_the_shell() {
        assert!(closes_shell(&ReadlineError::Eof));
        assert!(closes_shell(&ReadlineError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))));
    }
}
