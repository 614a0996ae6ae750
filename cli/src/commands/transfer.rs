//! `wslkit transfer` — interactive or flag-driven SCP transfers.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::ports::MenuScreens;
use crate::application::services::transfer::{
    self, TransferDraft, TransferOutcome, TransferPorts, TransferSettings,
};
use crate::commands::goodbye;
use crate::domain::error::is_interrupted;
use crate::domain::transfer::parse_port;

/// Exit status of a shell whose child was stopped with Ctrl-C.
const INTERRUPTED_EXIT: u8 = 130;

/// Arguments for the transfer command.
#[derive(Args)]
pub struct TransferArgs {
    #[command(subcommand)]
    pub action: Option<TransferAction>,
}

#[derive(Subcommand)]
pub enum TransferAction {
    /// Copy a file from the SSH server to this machine
    Download(TransferFlags),
    /// Copy a local file to the SSH server
    Upload(TransferFlags),
    /// Show help & tips
    Help,
}

/// Values that would otherwise be prompted for.
#[derive(Args, Default)]
pub struct TransferFlags {
    /// SSH username
    #[arg(long)]
    pub user: Option<String>,
    /// SSH host (IP or domain)
    #[arg(long)]
    pub host: Option<String>,
    /// SSH port
    #[arg(long, value_parser = port_arg)]
    pub port: Option<u16>,
    /// Local path (source for upload, destination for download)
    #[arg(long)]
    pub local: Option<String>,
    /// Remote path on the server
    #[arg(long)]
    pub remote: Option<String>,
}

fn port_arg(value: &str) -> Result<u16, String> {
    parse_port(value).map_err(|e| e.to_string())
}

impl From<TransferFlags> for TransferDraft {
    fn from(flags: TransferFlags) -> Self {
        Self {
            user: flags.user,
            host: flags.host,
            port: flags.port,
            local: flags.local,
            remote: flags.remote,
        }
    }
}

fn outcome_code(outcome: TransferOutcome) -> ExitCode {
    match outcome {
        TransferOutcome::Completed | TransferOutcome::Cancelled => ExitCode::SUCCESS,
        TransferOutcome::Failed(Some(code)) => {
            ExitCode::from(u8::try_from(code & 0xff).unwrap_or(1))
        }
        TransferOutcome::Interrupted => ExitCode::from(INTERRUPTED_EXIT),
        TransferOutcome::Failed(None) | TransferOutcome::Errored | TransferOutcome::Aborted => {
            ExitCode::FAILURE
        }
    }
}

/// Entry point for `wslkit transfer`.
///
/// # Errors
///
/// Returns an error if a prompt fails or a required value is missing in
/// non-interactive mode.
pub async fn run(app: &AppContext, args: TransferArgs) -> Result<ExitCode> {
    match run_inner(app, args).await {
        Err(e) if is_interrupted(&e) => Ok(goodbye(app)),
        other => other,
    }
}

async fn run_inner(app: &AppContext, args: TransferArgs) -> Result<ExitCode> {
    let reporter = app.reporter();
    let ports = TransferPorts {
        runner: &app.runner,
        prompter: &app.prompter,
        fs: &app.fs,
        reporter: &reporter,
    };
    let settings = TransferSettings {
        default_port: app.config.transfer.default_port,
        non_interactive: app.non_interactive,
    };

    match args.action {
        Some(TransferAction::Download(flags)) => {
            let outcome = transfer::download(&ports, settings, flags.into()).await?;
            Ok(outcome_code(outcome))
        }
        Some(TransferAction::Upload(flags)) => {
            let outcome = transfer::upload(&ports, settings, flags.into()).await?;
            Ok(outcome_code(outcome))
        }
        Some(TransferAction::Help) => {
            app.renderer().transfer_tips();
            Ok(ExitCode::SUCCESS)
        }
        None if app.non_interactive => {
            anyhow::bail!("choose `download` or `upload` when running with --yes")
        }
        None => {
            transfer::run_menu(&ports, &app.renderer(), settings).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
