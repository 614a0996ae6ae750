//! `wslkit ssh` — SSH server in WSL plus the Windows portproxy in front of it.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::ports::MenuScreens;
use crate::application::services::ssh_setup::{
    SshPorts, SshSettings, cleanup_all, install_ssh, resolve_credentials, run_menu, update_portproxy,
};
use crate::commands::goodbye;
use crate::domain::error::is_interrupted;
use crate::infra::ip_store::FileIpStore;

/// Arguments for the ssh command.
#[derive(Args)]
pub struct SshArgs {
    /// Rebind the portproxy if the WSL IP changed, without prompting.
    /// Takes precedence over a subcommand.
    #[arg(long)]
    pub auto: bool,

    #[command(subcommand)]
    pub action: Option<SshCommand>,
}

#[derive(Subcommand)]
pub enum SshCommand {
    /// Install & configure openssh-server and add the portproxy
    Install {
        /// WSL user whose password is set
        #[arg(long)]
        user: Option<String>,
        /// Password to set (prompted for when omitted)
        #[arg(long, env = "WSLKIT_SSH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Rebind the portproxy if the WSL IP has changed
    Update,
    /// Remove the portproxy and stop the SSH service
    Cleanup,
    /// Same as `update`, with the auto-mode banner (for schedulers)
    Auto,
}

/// Entry point for `wslkit ssh`.
///
/// # Errors
///
/// Returns an error if the WSL address cannot be determined, the IP cache
/// cannot be accessed, or a required value is missing in non-interactive
/// mode.
pub async fn run(app: &AppContext, args: SshArgs) -> Result<ExitCode> {
    match run_inner(app, args).await {
        Err(e) if is_interrupted(&e) => Ok(goodbye(app)),
        other => other,
    }
}

async fn run_inner(app: &AppContext, args: SshArgs) -> Result<ExitCode> {
    let action = if args.auto {
        Some(SshCommand::Auto)
    } else {
        args.action
    };

    let reporter = app.reporter();
    let store = FileIpStore::new(&app.config.ssh.ip_store);
    let ports = SshPorts {
        runner: &app.runner,
        store: &store,
        reporter: &reporter,
    };
    let settings = SshSettings {
        powershell: &app.config.powershell.path,
        ssh: &app.config.ssh,
    };

    match action {
        Some(SshCommand::Install { user, password }) => {
            let (user, password) =
                resolve_credentials(&app.prompter, &reporter, user, password, app.non_interactive)?;
            let summary = install_ssh(&ports, &settings, &user, &password).await?;
            app.renderer().ssh_summary(&summary);
        }
        Some(SshCommand::Update) => {
            update_portproxy(&ports, &settings).await?;
        }
        Some(SshCommand::Cleanup) => {
            cleanup_all(&ports, &settings).await?;
        }
        Some(SshCommand::Auto) => {
            app.output
                .success("Auto mode: Checking and updating portproxy if needed...");
            update_portproxy(&ports, &settings).await?;
        }
        None if app.non_interactive => {
            anyhow::bail!("choose `install`, `update`, `cleanup` or `--auto` when running with --yes")
        }
        None => run_menu(&ports, &settings, &app.prompter, &app.renderer()).await?,
    }
    Ok(ExitCode::SUCCESS)
}
