//! Application service — drive the PowerShell window helper.

use anyhow::Result;
use wslkit_common::{WindowAction, WindowInfo};

use crate::application::ports::{CommandRunner, ProgressReporter, Prompter};
use crate::application::services::say_goodbye;
use crate::domain::error::{WindowError, is_interrupted};
use crate::domain::windows::{ReplCommand, parse_repl_command, parse_window_list, script_args};

/// Help block shown before every REPL prompt.
pub const REPL_MENU: &[&str] = &[
    "Available commands:",
    "1. list - List all active windows",
    "2. min <index> - Minimize window by index",
    "3. max <index> - Maximize window by index",
    "4. restore <index> - Restore window by index",
    "5. close <index> - Close window by index",
    "6. focus <index> - Focus window by index",
    "7. toggle <index> - Toggle maximize/restore window by index",
    "8. quit - Exit",
];

/// Convert a Linux path to its Windows form with `wslpath -w`. Falls back to
/// the input when the conversion fails.
pub async fn windows_path(runner: &impl CommandRunner, linux_path: &str) -> String {
    match runner.run("wslpath", &["-w", linux_path]).await {
        Ok(output) if output.status.success() => {
            let converted = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if converted.is_empty() {
                linux_path.to_string()
            } else {
                converted
            }
        }
        Ok(output) => {
            tracing::debug!(
                status = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "wslpath failed, using path as-is"
            );
            linux_path.to_string()
        }
        Err(e) => {
            tracing::debug!(error = %e, "wslpath unavailable, using path as-is");
            linux_path.to_string()
        }
    }
}

/// Invokes the helper script through PowerShell.
pub struct WindowController<'a, C, R> {
    pub runner: &'a C,
    pub reporter: &'a R,
    pub powershell: &'a str,
    /// Script location in Windows form.
    pub script: String,
}

struct ScriptResult {
    stdout: String,
    stderr: String,
    success: bool,
}

impl<C: CommandRunner, R: ProgressReporter> WindowController<'_, C, R> {
    async fn invoke(&self, action: WindowAction, index: Option<u32>) -> ScriptResult {
        let args = script_args(&self.script, action, index);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match self.runner.run(self.powershell, &args).await {
            Ok(output) => {
                tracing::debug!(action = %action, status = ?output.status.code(), "window helper finished");
                ScriptResult {
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    success: output.status.success(),
                }
            }
            Err(e) => ScriptResult {
                stdout: String::new(),
                stderr: format!("{e:#}"),
                success: false,
            },
        }
    }

    /// List top-level windows. The script's table is echoed when `echo` is
    /// set; failures are reported and yield an empty list.
    pub async fn list(&self, echo: bool) -> Vec<WindowInfo> {
        let result = self.invoke(WindowAction::List, None).await;
        if !result.success {
            self.reporter
                .error(&format!("Error listing windows: {}", result.stderr.trim()));
            return Vec::new();
        }
        if echo {
            for line in result.stdout.lines() {
                self.reporter.line(line.trim_end_matches('\r'));
            }
        }
        parse_window_list(&result.stdout)
    }

    /// Apply `action` to window `index` (1-based). Returns whether the helper
    /// succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::MissingIndex`] when `index` is 0.
    pub async fn act(&self, action: WindowAction, index: u32) -> Result<bool> {
        if index == 0 {
            return Err(WindowError::MissingIndex(action.verb()).into());
        }
        let result = self.invoke(action, Some(index)).await;
        if result.success {
            self.reporter.line(result.stdout.trim());
        } else {
            self.reporter
                .error(&format!("Error: {}", result.stderr.trim()));
        }
        Ok(result.success)
    }
}

/// Interactive loop: prints the menu, reads a command, runs it. Errors from
/// one command are printed and the loop continues; Ctrl-C ends it.
///
/// # Errors
///
/// Returns an error only if reading input fails for a reason other than
/// an interrupt.
pub async fn run_repl<C, R, P>(controller: &WindowController<'_, C, R>, prompter: &P) -> Result<()>
where
    C: CommandRunner,
    R: ProgressReporter,
    P: Prompter,
{
    let reporter = controller.reporter;
    reporter.line("Windows Controller - WSL Edition");
    reporter.line(&"=".repeat(40));

    loop {
        reporter.line("");
        for line in REPL_MENU {
            reporter.line(line);
        }

        let answer = match prompter.input("Enter command", Some("")) {
            Ok(answer) => answer,
            Err(e) if is_interrupted(&e) => {
                say_goodbye(reporter);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match parse_repl_command(&answer) {
            ReplCommand::Quit => return Ok(()),
            ReplCommand::List => {
                controller.list(true).await;
            }
            ReplCommand::Act { action, index } => {
                if let Err(e) = controller.act(action, index).await {
                    reporter.error(&format!("Error: {e}"));
                }
            }
            ReplCommand::InvalidFormat(action) => {
                reporter.warn(&format!("Invalid format. Use: {} <index>", action.verb()));
            }
            ReplCommand::Unknown => {
                reporter.warn("Unknown command. Type 'list' to see windows or 'quit' to exit.");
            }
        }
    }
}
