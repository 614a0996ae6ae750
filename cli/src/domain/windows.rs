//! Window helper output parsing and the interactive command grammar.

use std::sync::LazyLock;

use regex::Regex;
use wslkit_common::{WindowAction, WindowInfo};

#[allow(clippy::expect_used)] // compile-time constant pattern
static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(.+?)\s+(\w+)\s+(\w+)\s*$").expect("valid window row pattern")
});

/// Parse the table printed by `-Action list`.
///
/// Rows start after the `---` rule and stop at `Usage Examples:`. Lines that
/// do not look like `<index> <title> <process> <state>` are skipped.
#[must_use]
pub fn parse_window_list(stdout: &str) -> Vec<WindowInfo> {
    let mut windows = Vec::new();
    let mut in_table = false;

    for line in stdout.lines() {
        let line = line.trim_end_matches('\r');
        if line.starts_with("---") {
            in_table = true;
            continue;
        }
        if line.starts_with("Usage Examples:") {
            break;
        }
        if !in_table || line.trim().is_empty() {
            continue;
        }
        let Some(caps) = ROW.captures(line) else {
            continue;
        };
        let Ok(index) = caps[1].parse::<u32>() else {
            continue;
        };
        windows.push(WindowInfo {
            index,
            title: caps[2].trim().to_string(),
            process: caps[3].to_string(),
            state: caps[4].to_string(),
        });
    }

    windows
}

/// One line typed at the `windows` prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    List,
    Act { action: WindowAction, index: u32 },
    /// Known verb, wrong shape (`min x`, `min 1 2`, `min 0`).
    InvalidFormat(WindowAction),
    Unknown,
}

/// Parse a REPL line. Verbs are matched case-sensitively as `<verb> `
/// prefixes; `quit`, `q`, `exit` and `list` are case-insensitive.
#[must_use]
pub fn parse_repl_command(line: &str) -> ReplCommand {
    let command = line.trim();
    let lower = command.to_ascii_lowercase();
    if matches!(lower.as_str(), "quit" | "q" | "exit") {
        return ReplCommand::Quit;
    }
    if lower == "list" {
        return ReplCommand::List;
    }

    for action in WindowAction::TARGETED {
        let Some(rest) = command
            .strip_prefix(action.verb())
            .filter(|rest| rest.starts_with(' '))
        else {
            continue;
        };
        let parts: Vec<&str> = rest.split_whitespace().collect();
        return match parts.as_slice() {
            [index] if index.chars().all(|c| c.is_ascii_digit()) => match index.parse::<u32>() {
                Ok(index) if index > 0 => ReplCommand::Act { action, index },
                _ => ReplCommand::InvalidFormat(action),
            },
            _ => ReplCommand::InvalidFormat(action),
        };
    }

    ReplCommand::Unknown
}

/// Arguments after the PowerShell executable.
#[must_use]
pub fn script_args(script: &str, action: WindowAction, index: Option<u32>) -> Vec<String> {
    let mut args = vec![
        "-ExecutionPolicy".to_string(),
        "Bypass".to_string(),
        "-File".to_string(),
        script.to_string(),
        "-Action".to_string(),
        action.script_name().to_string(),
    ];
    if let Some(index) = index.filter(|i| *i > 0 && action.needs_index()) {
        args.push("-WindowIndex".to_string());
        args.push(index.to_string());
    }
    args
}
