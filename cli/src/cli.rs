//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Bridge utilities for a Windows + WSL development box
#[derive(Parser)]
#[command(
    name = "wslkit",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Never prompt; use flags and defaults (also CI / `WSLKIT_YES`)
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a command inside WSL through PowerShell
    Run(commands::run::RunArgs),

    /// Run a command in a local bash with DISPLAY set
    Exec(commands::exec::ExecArgs),

    /// Copy files to or from an SSH server with scp
    #[command(disable_help_subcommand = true)]
    Transfer(commands::transfer::TransferArgs),

    /// List and control Windows desktop windows
    Windows(commands::windows::WindowsArgs),

    /// Set up SSH in WSL and keep the Windows portproxy pointed at it
    Ssh(commands::ssh::SshArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            command,
        } = self;

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        };

        match command {
            Command::Version => {
                let ctx = crate::output::OutputContext::new(no_color, quiet);
                commands::version::run(&ctx, json)
            }
            Command::Run(args) => commands::run::run(&AppContext::new(&flags)?, args).await,
            Command::Exec(args) => commands::exec::run(&AppContext::new(&flags)?, args).await,
            Command::Transfer(args) => {
                commands::transfer::run(&AppContext::new(&flags)?, args).await
            }
            Command::Windows(args) => {
                commands::windows::run(&AppContext::new(&flags)?, args).await
            }
            Command::Ssh(args) => commands::ssh::run(&AppContext::new(&flags)?, args).await,
            Command::Config(cmd) => commands::config::run(&AppContext::new(&flags)?, cmd),
        }
    }
}
