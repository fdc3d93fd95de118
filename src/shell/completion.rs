//! Tab completion over the operator command grammar

use crate::commands::grammar::{lookup, GRAMMAR};

/// Candidates for the word under the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Byte offset in the line where the completed word starts
    pub start: usize,
    pub candidates: Vec<&'static str>,
}

/// Complete the word ending at `pos`.
///
/// Only the command after the last `;` is considered, so every command of a
/// joined line completes the same way as a single command would.
pub fn complete(line: &str, pos: usize) -> Completion {
    let prefix = line.get(..pos).unwrap_or(line);
    let segment_start = prefix.rfind(';').map(|i| i + 1).unwrap_or(0);
    let segment = &prefix[segment_start..];

    let word_start = segment
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let partial = &segment[word_start..];
    let words: Vec<&str> = segment[..word_start].split_whitespace().collect();

    let options: Vec<&'static str> = match words.as_slice() {
        [] => GRAMMAR.iter().map(|spec| spec.name).collect(),
        [command] => lookup(command).map(|spec| spec.args.to_vec()).unwrap_or_default(),
        _ => Vec::new(),
    };

    Completion {
        start: segment_start + word_start,
        candidates: options
            .into_iter()
            .filter(|option| option.starts_with(partial))
            .collect(),
    }
}
