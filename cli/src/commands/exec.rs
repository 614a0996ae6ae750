//! `wslkit exec` — run a command in a local bash with `DISPLAY` set.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::Prompter;
use crate::application::services::launch::{self, prompt_required};
use crate::commands::{exit_code, goodbye};
use crate::domain::error::is_interrupted;

/// Arguments for the exec command.
#[derive(Args)]
pub struct ExecArgs {
    /// Working directory; prompted for when omitted
    #[arg(long)]
    pub dir: Option<String>,

    /// Command to run; prompted for when omitted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub cmd: Vec<String>,
}

/// Entries from `./.env` whose keys are not already set in the environment.
///
/// # Errors
///
/// Returns an error if `.env` exists but cannot be parsed.
pub fn dotenv_overlay(path: &Path) -> Result<Vec<(String, String)>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("failed to parse dotenv file {}", path.display()))?;

    let mut vars = Vec::new();
    for entry in iter {
        let (key, value) =
            entry.with_context(|| format!("invalid dotenv entry in {}", path.display()))?;
        if std::env::var_os(&key).is_none() {
            vars.push((key, value));
        }
    }
    tracing::debug!(count = vars.len(), "loaded .env");
    Ok(vars)
}

/// Entry point for `wslkit exec`.
///
/// # Errors
///
/// Returns an error if `.env` is malformed, a required value is missing in
/// non-interactive mode, or bash cannot be started.
pub async fn run(app: &AppContext, args: ExecArgs) -> Result<ExitCode> {
    match run_inner(app, args).await {
        Err(e) if is_interrupted(&e) => Ok(goodbye(app)),
        other => other,
    }
}

async fn run_inner(app: &AppContext, args: ExecArgs) -> Result<ExitCode> {
    let reporter = app.reporter();
    let overlay = dotenv_overlay(Path::new(".env"))?;

    let dir = match args.dir {
        Some(dir) => dir,
        None if app.non_interactive => bail!("--dir is required with --yes"),
        None => {
            let answer = app
                .prompter
                .input("Enter working directory or enter quit to exit", None)?;
            if answer.eq_ignore_ascii_case("quit") {
                app.output.line("Exiting.");
                return Ok(ExitCode::SUCCESS);
            }
            answer
        }
    };

    let cmd = if !args.cmd.is_empty() {
        args.cmd.join(" ")
    } else if app.non_interactive {
        bail!("a command is required with --yes");
    } else {
        prompt_required(&app.prompter, &reporter, "Enter full cmd to run")?
    };

    let extra: Vec<(&str, &str)> = overlay
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let status = launch::run_with_display(
        &app.runner,
        &reporter,
        &app.config.exec.display,
        &dir,
        &cmd,
        &extra,
    )
    .await?;
    Ok(exit_code(status))
}
