//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::Result;

use crate::domain::WslkitConfig;
use crate::domain::network::InstallSummary;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
    /// Run a program with stdin piped from `stdin`.
    async fn run_with_stdin(&self, program: &str, args: &[&str], stdin: &[u8]) -> Result<Output>;
    /// Run a program with inherited stdio and extra environment variables.
    /// No timeout — the user drives the child interactively.
    async fn run_status(
        &self,
        program: &str,
        args: &[&str],
        envs: &[(&str, &str)],
    ) -> Result<ExitStatus>;
    /// Run a program, handing each stdout/stderr line to `on_line` as it
    /// arrives. No timeout. Bytes that are not UTF-8 are replaced, never
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ProcessError::Interrupted`] when Ctrl-C
    /// arrives first; the child is killed.
    async fn run_streaming(
        &self,
        program: &str,
        args: &[&str],
        on_line: &mut dyn FnMut(&str),
    ) -> Result<ExitStatus>;
}

// ── Prompt Port ───────────────────────────────────────────────────────────────

/// Abstracts interactive line input so menus can be driven by scripts in tests.
pub trait Prompter {
    /// Ask for a line of text. The answer is trimmed; an empty answer yields
    /// `default` when one is given, otherwise the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::PromptError::Interrupted`] on Ctrl-C, or an
    /// I/O error when no terminal is available.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;
    /// Ask for a secret without echoing it.
    fn password(&self, prompt: &str) -> Result<String>;
    /// Clear the terminal between menu rounds. No-op when not a TTY.
    fn clear_screen(&self);
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit an error message. Never suppressed.
    fn error(&self, message: &str);
    /// Echo an external command line before it runs.
    fn command(&self, command_line: &str);
    /// Emit a line of plain text (child output, tables, summaries).
    fn line(&self, text: &str);
    /// Show an activity indicator for a slow step until [`Self::end_busy`].
    fn begin_busy(&self, _message: &str) {}
    fn end_busy(&self) {}
}

// ── Menu Screen Port ──────────────────────────────────────────────────────────

/// Fixed screens drawn by the interactive menus. Kept apart from
/// [`ProgressReporter`] so the Presentation layer owns their layout.
pub trait MenuScreens {
    fn transfer_banner(&self);
    fn transfer_menu(&self);
    /// The "help & tips" page, also shown by `wslkit transfer help`.
    fn transfer_tips(&self);
    fn ssh_menu(&self);
    fn ssh_summary(&self, summary: &InstallSummary);
}

// ── State and Config Ports ────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load configuration, returning defaults when no file exists.
    fn load(&self) -> Result<WslkitConfig>;
    /// Persist configuration.
    fn save(&self, config: &WslkitConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}

/// Abstracts the one-line cache of the last WSL address bound to portproxy.
pub trait IpStore {
    /// Raw trimmed contents, `None` when the cache is absent or empty.
    fn load(&self) -> Result<Option<String>>;
    /// Replace the cache with `ip`.
    fn save(&self, ip: &str) -> Result<()>;
    /// Remove the cache. Removing an absent cache is not an error.
    fn clear(&self) -> Result<()>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the local filesystem facts the transfer flows need.
pub trait LocalFs {
    /// Expand a leading `~` and `$VAR` / `${VAR}` references.
    fn expand(&self, path: &str) -> String;
    fn exists(&self, path: &Path) -> bool;
    /// Size in bytes, `None` when the path cannot be read.
    fn file_size(&self, path: &Path) -> Option<u64>;
}
