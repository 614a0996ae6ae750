//! Application service — run a user command inside WSL (through PowerShell)
//! or in a local bash with a GUI display.

use std::collections::BTreeMap;
use std::process::ExitStatus;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProgressReporter, Prompter};
use crate::domain::shell::{cd_and_run, display_command, with_display, wsl_bash_command};

/// How [`choose_project`] resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectChoice {
    /// Working directory of the chosen project.
    Dir(String),
    Exit,
}

/// Menu lines for the project picker: `1. name` ... then `0. Exit`.
#[must_use]
pub fn project_menu(projects: &BTreeMap<String, String>) -> Vec<String> {
    let mut lines: Vec<String> = projects
        .keys()
        .enumerate()
        .map(|(i, name)| format!("{}. {name}", i + 1))
        .collect();
    lines.push("0. Exit".to_string());
    lines
}

/// Resolve a menu answer (number or project name) to a project directory.
///
/// # Errors
///
/// Returns an error for anything that is not `0`, a listed number, or a
/// project name.
pub fn resolve_project(projects: &BTreeMap<String, String>, answer: &str) -> Result<ProjectChoice> {
    let answer = answer.trim();
    if answer == "0" {
        return Ok(ProjectChoice::Exit);
    }
    if let Some(dir) = projects.get(answer) {
        return Ok(ProjectChoice::Dir(dir.clone()));
    }
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| projects.values().nth(i))
        .map(|dir| ProjectChoice::Dir(dir.clone()))
        .ok_or_else(|| anyhow::anyhow!("Invalid choice: {answer}"))
}

/// Show the project menu and ask for a choice.
///
/// # Errors
///
/// Returns an error if the prompt fails or the choice is invalid.
pub fn choose_project(
    prompter: &impl Prompter,
    reporter: &impl ProgressReporter,
    projects: &BTreeMap<String, String>,
) -> Result<ProjectChoice> {
    for line in project_menu(projects) {
        reporter.line(&line);
    }
    let answer = prompter.input("Choose an option", None)?;
    resolve_project(projects, &answer)
}

/// Ask until a non-empty answer is given.
///
/// # Errors
///
/// Returns an error if the prompt fails.
pub fn prompt_required(
    prompter: &impl Prompter,
    reporter: &impl ProgressReporter,
    prompt: &str,
) -> Result<String> {
    loop {
        let answer = prompter.input(prompt, None)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
        reporter.warn("This field is required. Please enter a value.");
    }
}

/// Settings for [`run_in_wsl`].
pub struct WslTarget<'a> {
    pub powershell: &'a str,
    pub distro: &'a str,
}

/// Run `cmd` in `dir` inside the WSL distro via `powershell.exe -Command`.
///
/// # Errors
///
/// Returns an error if PowerShell cannot be started.
pub async fn run_in_wsl(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    target: &WslTarget<'_>,
    dir: &str,
    cmd: &str,
) -> Result<ExitStatus> {
    let command = wsl_bash_command(target.distro, &cd_and_run(dir, cmd));
    let args = ["-Command", command.as_str()];
    reporter.command(&display_command(target.powershell, &args));
    let status = runner.run_status(target.powershell, &args, &[]).await?;
    tracing::debug!(status = ?status.code(), "wsl command finished");
    Ok(status)
}

/// Run `cmd` in `dir` with `DISPLAY` exported and unbuffered Python output.
/// `extra_env` is added on top of the inherited environment.
///
/// # Errors
///
/// Returns an error if bash cannot be started.
pub async fn run_with_display(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    display: &str,
    dir: &str,
    cmd: &str,
    extra_env: &[(&str, &str)],
) -> Result<ExitStatus> {
    let script = with_display(display, dir, cmd);
    let args = ["-c", script.as_str()];
    let mut envs = extra_env.to_vec();
    envs.push(("PYTHONUNBUFFERED", "1"));
    reporter.command(&display_command("bash", &args));
    let status = runner.run_status("bash", &args, &envs).await?;
    tracing::debug!(status = ?status.code(), "bash command finished");
    Ok(status)
}
