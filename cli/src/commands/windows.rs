//! `wslkit windows` — list and control desktop windows through PowerShell.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Subcommand};
use wslkit_common::WindowAction;

use crate::app::AppContext;
use crate::application::services::windows::{WindowController, run_repl, windows_path};
use crate::infra::assets::ensure_window_script;
use crate::infra::config::wslkit_dir;
use crate::output::json;

/// Arguments for the windows command.
#[derive(Args)]
pub struct WindowsArgs {
    #[command(subcommand)]
    pub action: Option<WindowsCommand>,
}

#[derive(Subcommand)]
pub enum WindowsCommand {
    /// List all top-level windows
    List,
    /// Minimize window by index
    Min { index: u32 },
    /// Maximize window by index
    Max { index: u32 },
    /// Restore window by index
    Restore { index: u32 },
    /// Close window by index
    Close { index: u32 },
    /// Bring window to the front by index
    Focus { index: u32 },
    /// Toggle maximize/restore window by index
    Toggle { index: u32 },
}

impl WindowsCommand {
    fn action(&self) -> (WindowAction, Option<u32>) {
        match *self {
            Self::List => (WindowAction::List, None),
            Self::Min { index } => (WindowAction::Minimize, Some(index)),
            Self::Max { index } => (WindowAction::Maximize, Some(index)),
            Self::Restore { index } => (WindowAction::Restore, Some(index)),
            Self::Close { index } => (WindowAction::Close, Some(index)),
            Self::Focus { index } => (WindowAction::Focus, Some(index)),
            Self::Toggle { index } => (WindowAction::Toggle, Some(index)),
        }
    }
}

/// Entry point for `wslkit windows`.
///
/// # Errors
///
/// Returns an error if the helper script cannot be located or extracted,
/// or the index is 0.
pub async fn run(app: &AppContext, args: WindowsArgs) -> Result<ExitCode> {
    let reporter = app.reporter();
    let script = ensure_window_script(app.config.windows.script.as_deref(), &wslkit_dir()?)?;
    let script = windows_path(&app.runner, &script.to_string_lossy()).await;
    tracing::debug!(%script, "window helper");

    let controller = WindowController {
        runner: &app.runner,
        reporter: &reporter,
        powershell: &app.config.powershell.path,
        script,
    };

    let Some(command) = args.action else {
        run_repl(&controller, &app.prompter).await?;
        return Ok(ExitCode::SUCCESS);
    };

    match command.action() {
        (WindowAction::List, _) => {
            let windows = controller.list(!app.is_json()).await;
            if app.is_json() {
                json::print(&windows)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        (action, index) => {
            let ok = controller.act(action, index.unwrap_or(0)).await?;
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}
