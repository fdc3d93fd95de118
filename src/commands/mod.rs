//! Operator command language
//! 
//! This module contains the command grammar, the line parser and the
//! interpreter that turns commands into state mutations.

pub mod grammar;
pub mod parser;
pub mod interpreter;

// Re-export main types
pub use grammar::{CommandSpec, GRAMMAR};
pub use parser::{parse_command, split_commands, Command, ParseError, TimeArg};
pub use interpreter::{CommandInterpreter, Execution, Reply, ReplyKind};
