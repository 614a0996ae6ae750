//! SCP transfer requests and the input rules of the transfer menu.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use wslkit_common::TransferDirection;

use crate::domain::error::TransferError;

#[allow(clippy::expect_used)] // compile-time constant pattern
static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z0-9_]+)\}|([A-Za-z0-9_]+))").expect("valid env var pattern")
});

/// Parse an SSH port (1–65535).
///
/// # Errors
///
/// Returns [`TransferError::InvalidPort`] for anything else.
pub fn parse_port(value: &str) -> Result<u16, TransferError> {
    match value.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(TransferError::InvalidPort(value.trim().to_string())),
    }
}

/// Expand a leading `~` to `home` and `$VAR` / `${VAR}` through `lookup`.
/// Unknown variables, and `~` without a home directory, are left as typed.
#[must_use]
pub fn expand_path(path: &str, home: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> String {
    let with_home = match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            format!("{}{rest}", home.display())
        }
        _ => path.to_string(),
    };

    ENV_VAR
        .replace_all(&with_home, |caps: &Captures<'_>| {
            let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            lookup(name).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Size shown in the upload summary.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// A fully specified transfer, ready to hand to `scp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub direction: TransferDirection,
    pub user: String,
    pub host: String,
    pub port: u16,
    pub local: String,
    pub remote: String,
}

impl TransferRequest {
    /// `user@host:path` on the remote side.
    #[must_use]
    pub fn remote_spec(&self) -> String {
        format!("{}@{}:{}", self.user, self.host, self.remote)
    }

    #[must_use]
    pub fn source(&self) -> String {
        match self.direction {
            TransferDirection::Download => self.remote_spec(),
            TransferDirection::Upload => self.local.clone(),
        }
    }

    #[must_use]
    pub fn destination(&self) -> String {
        match self.direction {
            TransferDirection::Download => self.local.clone(),
            TransferDirection::Upload => self.remote_spec(),
        }
    }

    /// Arguments after `scp`.
    #[must_use]
    pub fn scp_args(&self) -> Vec<String> {
        vec![
            "-P".to_string(),
            self.port.to_string(),
            self.source(),
            self.destination(),
        ]
    }
}

/// Top-level choice in the transfer menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Download,
    Upload,
    Help,
    Exit,
    Invalid,
}

#[must_use]
pub fn parse_menu_choice(answer: &str) -> MenuChoice {
    match answer.trim().to_ascii_lowercase().as_str() {
        "1" => MenuChoice::Download,
        "2" => MenuChoice::Upload,
        "3" => MenuChoice::Help,
        "4" | "exit" | "quit" | "q" => MenuChoice::Exit,
        _ => MenuChoice::Invalid,
    }
}

/// "Press Enter to continue or 'q' to quit" — only `q` quits.
#[must_use]
pub fn is_quit(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("q")
}

/// `(y/N)` prompts — only `y` / `yes` confirm.
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
