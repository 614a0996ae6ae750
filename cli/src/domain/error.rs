//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

// ── Network errors ────────────────────────────────────────────────────────────

/// Errors raised while determining the WSL network identity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("`hostname -I` reported no addresses. Is the WSL network up?")]
    NoAddress,

    #[error("`hostname -I` listed `{0}` first, which is not an IPv4 address")]
    NotIpv4(String),
}

// ── Transfer errors ───────────────────────────────────────────────────────────

/// Errors related to SCP transfer input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("Invalid SSH port `{0}`: expected a number between 1 and 65535")]
    InvalidPort(String),

    #[error("{0} is required")]
    MissingField(&'static str),
}

// ── Window errors ─────────────────────────────────────────────────────────────

/// Errors related to the PowerShell window helper.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error(
        "PowerShell script not found at {}\nPoint `windows.script` at window_manager.ps1 or unset it to use the bundled copy.",
        .0.display()
    )]
    ScriptNotFound(PathBuf),

    #[error("`{0}` needs a window index of 1 or more")]
    MissingIndex(&'static str),
}

// ── Interrupts ────────────────────────────────────────────────────────────────

/// Raised by prompters when the user aborts input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("Interrupted")]
    Interrupted,
}

/// Raised by the command runner when Ctrl-C arrives while a child runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error("{0} interrupted")]
    Interrupted(String),
}

/// `true` when `err` (or anything in its chain) is a user interrupt.
#[must_use]
pub fn is_interrupted(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(cause.downcast_ref::<PromptError>(), Some(PromptError::Interrupted))
            || matches!(cause.downcast_ref::<ProcessError>(), Some(ProcessError::Interrupted(_)))
    })
}
