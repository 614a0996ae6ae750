//! `wslkit run` — run a command inside WSL through PowerShell.

use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Args;

use crate::app::AppContext;
use crate::application::services::launch::{
    self, ProjectChoice, WslTarget, choose_project, prompt_required,
};
use crate::commands::{exit_code, goodbye};
use crate::domain::error::is_interrupted;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Project from `projects.<name>` in the config
    #[arg(short, long)]
    pub project: Option<String>,

    /// Working directory inside WSL (instead of a project)
    #[arg(long, conflicts_with = "project")]
    pub dir: Option<String>,

    /// Command to run; prompted for when omitted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub cmd: Vec<String>,
}

/// Entry point for `wslkit run`.
///
/// # Errors
///
/// Returns an error if the project is unknown, a required value is missing
/// in non-interactive mode, or PowerShell cannot be started.
pub async fn run(app: &AppContext, args: RunArgs) -> Result<ExitCode> {
    match run_inner(app, args).await {
        Err(e) if is_interrupted(&e) => Ok(goodbye(app)),
        other => other,
    }
}

async fn run_inner(app: &AppContext, args: RunArgs) -> Result<ExitCode> {
    let reporter = app.reporter();
    let projects = &app.config.projects;

    let dir = if let Some(dir) = args.dir {
        dir
    } else if let Some(name) = args.project {
        match projects.get(&name) {
            Some(dir) => dir.clone(),
            None => bail!(
                "Unknown project `{name}`. Add it with `wslkit config set projects.{name} <dir>`"
            ),
        }
    } else if app.non_interactive {
        bail!("--project or --dir is required with --yes");
    } else {
        match choose_project(&app.prompter, &reporter, projects)? {
            ProjectChoice::Dir(dir) => dir,
            ProjectChoice::Exit => {
                app.output.line("Exiting.");
                return Ok(ExitCode::SUCCESS);
            }
        }
    };

    let cmd = if !args.cmd.is_empty() {
        args.cmd.join(" ")
    } else if app.non_interactive {
        bail!("a command is required with --yes");
    } else {
        prompt_required(&app.prompter, &reporter, "Enter full cmd to run")?
    };

    let target = WslTarget {
        powershell: &app.config.powershell.path,
        distro: &app.config.wsl.distro,
    };
    let status = launch::run_in_wsl(&app.runner, &reporter, &target, &dir, &cmd).await?;
    Ok(exit_code(status))
}
