//! Command implementations

pub mod config;
pub mod exec;
pub mod run;
pub mod ssh;
pub mod transfer;
pub mod version;
pub mod windows;

use std::process::{ExitCode, ExitStatus};

/// Map a child's exit status onto wslkit's own exit code. Signal deaths
/// report 1.
#[must_use]
pub fn exit_code(status: ExitStatus) -> ExitCode {
    match status.code() {
        Some(0) => ExitCode::SUCCESS,
        Some(code) => ExitCode::from(u8::try_from(code & 0xff).unwrap_or(1)),
        None => ExitCode::FAILURE,
    }
}

/// Print the farewell used when a menu is interrupted with Ctrl-C.
pub(crate) fn goodbye(app: &crate::app::AppContext) -> ExitCode {
    app.output.line("");
    app.output.line("Goodbye!");
    ExitCode::SUCCESS
}
