//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod config_service;
pub mod launch;
pub mod ssh_setup;
pub mod transfer;
pub mod windows;

use crate::application::ports::ProgressReporter;

/// Closing line of an interactive loop ended with Ctrl-C.
pub(crate) fn say_goodbye<R: ProgressReporter>(reporter: &R) {
    reporter.line("");
    reporter.line("Goodbye!");
}
