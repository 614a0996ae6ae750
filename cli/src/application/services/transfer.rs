//! Application service — SCP download and upload flows.
//!
//! Values supplied up front (flags) are used as-is; anything missing is
//! prompted for, unless the flow is non-interactive, in which case a
//! missing required value is an error.

use std::path::Path;

use anyhow::Result;
use wslkit_common::TransferDirection;

use crate::application::ports::{CommandRunner, LocalFs, MenuScreens, ProgressReporter, Prompter};
use crate::application::services::say_goodbye;
use crate::domain::error::{TransferError, is_interrupted};
use crate::domain::shell::display_command;
use crate::domain::transfer::{
    MenuChoice, TransferRequest, format_size_mb, is_quit, is_yes, parse_menu_choice, parse_port,
};

/// Printed when the menu is left normally.
pub const FAREWELL: &str = "Thanks for using SSH File Transfer Tool!";

/// Transfer fields known before any prompting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferDraft {
    pub user: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub local: Option<String>,
    pub remote: Option<String>,
}

/// How a transfer flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Completed,
    /// `scp` exited non-zero (`None` when killed by a signal).
    Failed(Option<i32>),
    /// `scp` could not be started.
    Errored,
    /// Ctrl-C while `scp` was running.
    Interrupted,
    /// The user declined at the final confirmation.
    Cancelled,
    /// Upload source missing and the user did not continue.
    Aborted,
}

impl TransferOutcome {
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Injected ports for the transfer flows.
pub struct TransferPorts<'a, C, P, F, R> {
    pub runner: &'a C,
    pub prompter: &'a P,
    pub fs: &'a F,
    pub reporter: &'a R,
}

/// Per-run settings.
#[derive(Debug, Clone, Copy)]
pub struct TransferSettings {
    pub default_port: u16,
    /// Never prompt; fail on missing values and skip confirmations.
    pub non_interactive: bool,
}

/// `get_input` semantics: trimmed answer, default on empty, required fields
/// re-prompt until something is entered.
fn field<P: Prompter, R: ProgressReporter>(
    prompter: &P,
    reporter: &R,
    settings: TransferSettings,
    preset: Option<String>,
    prompt: &str,
    name: &'static str,
    default: Option<&str>,
) -> Result<String> {
    if let Some(value) = preset.filter(|v| !v.trim().is_empty()) {
        return Ok(value.trim().to_string());
    }
    if settings.non_interactive {
        return match default {
            Some(default) => Ok(default.to_string()),
            None => Err(TransferError::MissingField(name).into()),
        };
    }
    loop {
        let answer = prompter.input(prompt, default)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
        reporter.warn("This field is required. Please enter a value.");
    }
}

fn port_field<P: Prompter, R: ProgressReporter>(
    prompter: &P,
    reporter: &R,
    settings: TransferSettings,
    preset: Option<u16>,
) -> Result<u16> {
    if let Some(port) = preset {
        return Ok(port);
    }
    if settings.non_interactive {
        return Ok(settings.default_port);
    }
    let default = settings.default_port.to_string();
    loop {
        let answer = prompter.input("SSH Port", Some(&default))?;
        match parse_port(&answer) {
            Ok(port) => return Ok(port),
            Err(e) => reporter.warn(&e.to_string()),
        }
    }
}

fn show_connection<R: ProgressReporter>(reporter: &R, user: &str, host: &str, port: u16) {
    reporter.line("");
    reporter.line("Connection Details:");
    reporter.line(&format!("   User: {user}"));
    reporter.line(&format!("   Host: {host}"));
    reporter.line(&format!("   Port: {port}"));
}

/// "Press Enter to continue or 'q' to quit". Always proceeds when
/// non-interactive.
fn confirm_start<P: Prompter, R: ProgressReporter>(
    prompter: &P,
    reporter: &R,
    settings: TransferSettings,
    direction: TransferDirection,
) -> Result<bool> {
    if settings.non_interactive {
        return Ok(true);
    }
    reporter.line("");
    reporter.line(&format!("Ready to start {}?", direction.as_str()));
    let answer = prompter.input("Press Enter to continue or 'q' to quit", Some(""))?;
    Ok(!is_quit(&answer))
}

/// Run `scp` for `request`, streaming its combined output.
///
/// A spawn failure is reported and returned as [`TransferOutcome::Errored`];
/// Ctrl-C during the copy yields [`TransferOutcome::Interrupted`].
pub async fn run_scp<C: CommandRunner, R: ProgressReporter>(
    runner: &C,
    reporter: &R,
    request: &TransferRequest,
) -> TransferOutcome {
    let args = request.scp_args();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    reporter.line("");
    reporter.step("Starting file transfer...");
    reporter.line(&format!("Command: {}", display_command("scp", &args)));

    let mut on_line = |line: &str| reporter.line(line);
    match runner.run_streaming("scp", &args, &mut on_line).await {
        Ok(status) if status.success() => {
            tracing::info!(direction = request.direction.as_str(), "transfer completed");
            reporter.success("Transfer completed successfully!");
            reporter.success("File has been transferred.");
            TransferOutcome::Completed
        }
        Ok(status) => {
            let code = status.code();
            let shown = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
            reporter.error(&format!("Transfer failed with exit code {shown}"));
            TransferOutcome::Failed(code)
        }
        Err(e) if is_interrupted(&e) => {
            reporter.line("");
            reporter.warn("Transfer interrupted by user.");
            TransferOutcome::Interrupted
        }
        Err(e) => {
            reporter.error(&format!("Unexpected error occurred:\n{e:#}"));
            TransferOutcome::Errored
        }
    }
}

/// Remote → local.
///
/// # Errors
///
/// Returns an error if a prompt fails or a required value is missing in
/// non-interactive mode.
pub async fn download<C, P, F, R>(
    ports: &TransferPorts<'_, C, P, F, R>,
    settings: TransferSettings,
    draft: TransferDraft,
) -> Result<TransferOutcome>
where
    C: CommandRunner,
    P: Prompter,
    F: LocalFs,
    R: ProgressReporter,
{
    let (prompter, reporter) = (ports.prompter, ports.reporter);
    reporter.line("");
    reporter.line("DOWNLOAD MODE");
    reporter.line("Transfer files from remote SSH server to local machine");

    let user = field(prompter, reporter, settings, draft.user, "SSH Username", "SSH username", None)?;
    let host = field(prompter, reporter, settings, draft.host, "SSH Host (IP or domain)", "SSH host", None)?;
    let port = port_field(prompter, reporter, settings, draft.port)?;
    show_connection(reporter, &user, &host, port);

    let remote = field(
        prompter,
        reporter,
        settings,
        draft.remote,
        "Remote file path (full path on server)",
        "Remote path",
        None,
    )?;
    let local = field(
        prompter,
        reporter,
        settings,
        draft.local,
        "Local destination path",
        "Local path",
        Some("."),
    )?;
    let request = TransferRequest {
        direction: TransferDirection::Download,
        user,
        host,
        port,
        local: ports.fs.expand(&local),
        remote,
    };

    reporter.line("");
    reporter.line("Transfer Summary:");
    reporter.line(&format!("   From: {}", request.source()));
    reporter.line(&format!("   To:   {}", request.destination()));

    if !confirm_start(prompter, reporter, settings, request.direction)? {
        reporter.warn("Download cancelled.");
        return Ok(TransferOutcome::Cancelled);
    }
    Ok(run_scp(ports.runner, reporter, &request).await)
}

/// Local → remote.
///
/// # Errors
///
/// Returns an error if a prompt fails or a required value is missing in
/// non-interactive mode.
pub async fn upload<C, P, F, R>(
    ports: &TransferPorts<'_, C, P, F, R>,
    settings: TransferSettings,
    draft: TransferDraft,
) -> Result<TransferOutcome>
where
    C: CommandRunner,
    P: Prompter,
    F: LocalFs,
    R: ProgressReporter,
{
    let (prompter, reporter) = (ports.prompter, ports.reporter);
    reporter.line("");
    reporter.line("UPLOAD MODE");
    reporter.line("Transfer files from local machine to remote SSH server");

    let local = field(
        prompter,
        reporter,
        settings,
        draft.local,
        "Local file path to upload",
        "Local path",
        None,
    )?;
    let local = ports.fs.expand(&local);

    if !ports.fs.exists(Path::new(&local)) {
        reporter.warn(&format!("Warning: File '{local}' does not exist locally."));
        let proceed = !settings.non_interactive
            && is_yes(&prompter.input("Continue anyway? (y/N)", Some(""))?);
        if !proceed {
            reporter.error("Aborted due to file validation.");
            return Ok(TransferOutcome::Aborted);
        }
    }

    let user = field(prompter, reporter, settings, draft.user, "SSH Username", "SSH username", None)?;
    let host = field(prompter, reporter, settings, draft.host, "SSH Host (IP or domain)", "SSH host", None)?;
    let port = port_field(prompter, reporter, settings, draft.port)?;
    show_connection(reporter, &user, &host, port);

    let remote = field(
        prompter,
        reporter,
        settings,
        draft.remote,
        "Remote destination path",
        "Remote path",
        None,
    )?;
    let request = TransferRequest {
        direction: TransferDirection::Upload,
        user,
        host,
        port,
        local,
        remote,
    };

    reporter.line("");
    reporter.line("Transfer Summary:");
    reporter.line(&format!("   From: {}", request.source()));
    reporter.line(&format!("   To:   {}", request.destination()));
    if let Some(size) = ports.fs.file_size(Path::new(&request.local)) {
        reporter.line(&format!("   Size: {}", format_size_mb(size)));
    }

    if !confirm_start(prompter, reporter, settings, request.direction)? {
        reporter.warn("Upload cancelled.");
        return Ok(TransferOutcome::Cancelled);
    }
    Ok(run_scp(ports.runner, reporter, &request).await)
}

fn farewell<R: ProgressReporter>(reporter: &R) {
    reporter.line("");
    reporter.success(FAREWELL);
}

/// Interactive menu: download, upload, tips, exit. After each transfer the
/// user may go again or quit. Ctrl-C at any prompt ends the menu with
/// `Goodbye!`.
///
/// # Errors
///
/// Returns an error if reading input fails for a reason other than an
/// interrupt.
pub async fn run_menu<C, P, F, R, V>(
    ports: &TransferPorts<'_, C, P, F, R>,
    screens: &V,
    settings: TransferSettings,
) -> Result<()>
where
    C: CommandRunner,
    P: Prompter,
    F: LocalFs,
    R: ProgressReporter,
    V: MenuScreens,
{
    match menu_loop(ports, screens, settings).await {
        Err(e) if is_interrupted(&e) => {
            say_goodbye(ports.reporter);
            Ok(())
        }
        other => other,
    }
}

async fn menu_loop<C, P, F, R, V>(
    ports: &TransferPorts<'_, C, P, F, R>,
    screens: &V,
    settings: TransferSettings,
) -> Result<()>
where
    C: CommandRunner,
    P: Prompter,
    F: LocalFs,
    R: ProgressReporter,
    V: MenuScreens,
{
    let (prompter, reporter) = (ports.prompter, ports.reporter);
    prompter.clear_screen();
    screens.transfer_banner();

    loop {
        screens.transfer_menu();
        let answer = prompter.input("Your choice", Some("1"))?;

        let transferred = match parse_menu_choice(&answer) {
            MenuChoice::Download => {
                download(ports, settings, TransferDraft::default()).await?;
                true
            }
            MenuChoice::Upload => {
                upload(ports, settings, TransferDraft::default()).await?;
                true
            }
            MenuChoice::Help => {
                screens.transfer_tips();
                prompter.input("Press Enter to continue...", Some(""))?;
                false
            }
            MenuChoice::Exit => {
                farewell(reporter);
                return Ok(());
            }
            MenuChoice::Invalid => {
                reporter.error("Invalid choice. Please select 1-4.");
                false
            }
        };

        if transferred {
            reporter.line("");
            reporter.line("Would you like to perform another transfer?");
            let again = prompter.input("Press Enter to continue or 'q' to quit", Some(""))?;
            if is_quit(&again) {
                farewell(reporter);
                return Ok(());
            }
            prompter.clear_screen();
            screens.transfer_banner();
        }
    }
}
