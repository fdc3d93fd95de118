//! Static operator command grammar, shared by help output and tab completion

/// One top-level operator command
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    /// Fixed sub-arguments offered for completion
    pub args: &'static [&'static str],
    pub usage: &'static str,
    pub description: &'static str,
}

pub const GRAMMAR: &[CommandSpec] = &[
    CommandSpec {
        name: "question",
        args: &[],
        usage: "question <text>",
        description: "Set new question",
    },
    CommandSpec {
        name: "time",
        args: &["last", "pause", "countUp"],
        usage: "time <seconds|last|pause|countUp>",
        description: "Set time left or control timer",
    },
    CommandSpec {
        name: "type",
        args: &["pomoc", "rozstrel", "waiting", "end"],
        usage: "type <type>",
        description: "Set type (pomoc/rozstrel/waiting/end)",
    },
    CommandSpec {
        name: "status",
        args: &[],
        usage: "status",
        description: "Show current question status",
    },
    CommandSpec {
        name: "logging",
        args: &["on", "off"],
        usage: "logging <on/off>",
        description: "Enable/disable request logging",
    },
    CommandSpec {
        name: "help",
        args: &[],
        usage: "help",
        description: "Show this help",
    },
    CommandSpec {
        name: "exit",
        args: &[],
        usage: "exit",
        description: "Exit the program",
    },
];

pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    GRAMMAR.iter().find(|spec| spec.name == name)
}

/// Help lines, one per command
pub fn help_lines() -> Vec<String> {
    let width = GRAMMAR.iter().map(|spec| spec.usage.len()).max().unwrap_or(0);
    std::iter::once("Available commands:".to_string())
        .chain(
            GRAMMAR
                .iter()
                .map(|spec| format!("  {:<width$} - {}", spec.usage, spec.description)),
        )
        .collect()
}
