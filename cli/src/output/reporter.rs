//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use std::cell::RefCell;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ! {message}"` (suppressed when `ctx.quiet`)
/// - `error()` prints `"[!] {message}"` to stderr (never suppressed)
/// - `command()` prints `"[>] {command}"` (suppressed when `ctx.quiet`)
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    spinner: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            spinner: RefCell::new(None),
        }
    }

    /// Print without tearing an active spinner.
    fn print(&self, f: impl FnOnce()) {
        match self.spinner.borrow().as_ref() {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            self.print(|| println!("  {} {message}", "→".style(self.ctx.styles.value)));
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            self.print(|| println!("  {} {message}", "✓".style(self.ctx.styles.success)));
        }
    }

    fn warn(&self, message: &str) {
        if !self.ctx.quiet {
            self.print(|| println!("  {} {message}", "!".style(self.ctx.styles.warning)));
        }
    }

    fn error(&self, message: &str) {
        self.print(|| eprintln!("{} {message}", "[!]".style(self.ctx.styles.error)));
    }

    fn command(&self, command_line: &str) {
        if !self.ctx.quiet {
            self.print(|| println!("{} {command_line}", "[>]".style(self.ctx.styles.dim)));
        }
    }

    fn line(&self, text: &str) {
        if !self.ctx.quiet {
            self.print(|| println!("{text}"));
        }
    }

    fn begin_busy(&self, message: &str) {
        if self.ctx.show_progress() {
            self.end_busy();
            *self.spinner.borrow_mut() = Some(progress::spinner(message));
        }
    }

    fn end_busy(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        self.end_busy();
    }
}
