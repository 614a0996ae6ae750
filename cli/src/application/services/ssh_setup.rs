//! Application service — SSH server inside WSL plus the Windows portproxy
//! that forwards to it.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Individual command failures are reported and the sequence continues;
//! only a missing WSL address stops a use-case.

use std::net::Ipv4Addr;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, IpStore, MenuScreens, ProgressReporter, Prompter};
use crate::application::services::launch::prompt_required;
use crate::application::services::say_goodbye;
use crate::domain::config::SshConfig;
use crate::domain::error::is_interrupted;
use crate::domain::network::{
    self, InstallSummary, ReconcilePlan, netsh_add, netsh_delete, parse_hostname_ips, parse_stored_ip,
    plan_reconcile,
};
use crate::domain::shell::display_command;
use crate::domain::sshd::{apply_directives, required_directives};

/// `apt` can take minutes on a cold cache.
pub const APT_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Everything the SSH use-cases need to know about the environment.
pub struct SshSettings<'a> {
    /// PowerShell executable used to reach `netsh` on the Windows side.
    pub powershell: &'a str,
    pub ssh: &'a SshConfig,
}

/// Injected ports for the SSH use-cases.
pub struct SshPorts<'a, C, S, R> {
    pub runner: &'a C,
    pub store: &'a S,
    pub reporter: &'a R,
}

/// Result of [`update_portproxy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Unchanged(Ipv4Addr),
    Rebound {
        previous: Option<Ipv4Addr>,
        current: Ipv4Addr,
    },
}

/// Result of [`cleanup_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupOutcome {
    pub removed_rule: bool,
}

/// Echo, run, and report a command. Returns trimmed stdout even when the
/// command failed; spawn failures are reported the same way.
async fn run_logged<C: CommandRunner, R: ProgressReporter>(
    runner: &C,
    reporter: &R,
    program: &str,
    args: &[&str],
    stdin: Option<&[u8]>,
    timeout: Option<Duration>,
) -> (bool, String) {
    reporter.command(&display_command(program, args));
    let result = match (stdin, timeout) {
        (Some(input), _) => runner.run_with_stdin(program, args, input).await,
        (None, Some(timeout)) => runner.run_with_timeout(program, args, timeout).await,
        (None, None) => runner.run(program, args).await,
    };

    match result {
        Ok(output) => {
            tracing::debug!(program, ?args, status = ?output.status.code(), "command finished");
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                reporter.error(&format!("Error:\n{}", stderr.trim()));
            }
            (output.status.success(), stdout)
        }
        Err(e) => {
            tracing::debug!(program, ?args, error = %e, "command failed to run");
            reporter.error(&format!("Error:\n{e:#}"));
            (false, String::new())
        }
    }
}

/// WSL address: the first token reported by `hostname -I`.
///
/// # Errors
///
/// Returns an error when nothing is reported or the first token is not an
/// IPv4 address.
pub async fn current_wsl_ip<C: CommandRunner, S, R: ProgressReporter>(
    ports: &SshPorts<'_, C, S, R>,
) -> Result<Ipv4Addr> {
    let (_, stdout) = run_logged(ports.runner, ports.reporter, "hostname", &["-I"], None, None).await;
    Ok(parse_hostname_ips(&stdout)?)
}

/// Address recorded the last time the portproxy rule was written.
///
/// # Errors
///
/// Returns an error if the cache exists but cannot be read.
pub fn saved_ip<C, S: IpStore, R: ProgressReporter>(
    ports: &SshPorts<'_, C, S, R>,
) -> Result<Option<Ipv4Addr>> {
    let Some(raw) = ports.store.load()? else {
        return Ok(None);
    };
    let parsed = parse_stored_ip(&raw);
    if parsed.is_none() {
        ports
            .reporter
            .warn(&format!("Ignoring unreadable cached WSL IP `{raw}`"));
    }
    Ok(parsed)
}

async fn powershell_netsh<C: CommandRunner, S, R: ProgressReporter>(
    ports: &SshPorts<'_, C, S, R>,
    settings: &SshSettings<'_>,
    netsh: &str,
) -> bool {
    run_logged(
        ports.runner,
        ports.reporter,
        settings.powershell,
        &["-Command", netsh],
        None,
        None,
    )
    .await
    .0
}

/// Remove the portproxy rule on the configured listen address/port.
pub async fn delete_portproxy<C: CommandRunner, S, R: ProgressReporter>(
    ports: &SshPorts<'_, C, S, R>,
    settings: &SshSettings<'_>,
    ip: Ipv4Addr,
) -> bool {
    ports.reporter.step(&format!("Removing portproxy to {ip}..."));
    let ok = powershell_netsh(
        ports,
        settings,
        &netsh_delete(settings.ssh.listen_address, settings.ssh.listen_port),
    )
    .await;
    tracing::info!(%ip, ok, "portproxy delete");
    ok
}

/// Forward the listen port on Windows to the same port on `ip`.
pub async fn add_portproxy<C: CommandRunner, S, R: ProgressReporter>(
    ports: &SshPorts<'_, C, S, R>,
    settings: &SshSettings<'_>,
    ip: Ipv4Addr,
) -> bool {
    ports.reporter.step(&format!("Adding portproxy to {ip}..."));
    let rule = network::wsl_rule(settings.ssh.listen_address, settings.ssh.listen_port, ip);
    let ok = powershell_netsh(ports, settings, &netsh_add(&rule)).await;
    tracing::info!(%ip, port = settings.ssh.listen_port, ok, "portproxy add");
    ok
}

pub async fn restart_ssh<C: CommandRunner, S, R: ProgressReporter>(ports: &SshPorts<'_, C, S, R>) -> bool {
    ports.reporter.step("Restarting SSH service...");
    run_logged(
        ports.runner,
        ports.reporter,
        "sudo",
        &["service", "ssh", "restart"],
        None,
        None,
    )
    .await
    .0
}

fn remember_ip<C, S: IpStore, R: ProgressReporter>(ports: &SshPorts<'_, C, S, R>, ip: Ipv4Addr) -> Result<()> {
    ports.store.save(&ip.to_string())?;
    tracing::info!(%ip, "cached WSL IP");
    Ok(())
}

/// Rewrite `sshd_config` with the enforced directives via `sudo tee`.
async fn configure_sshd<C: CommandRunner, S, R: ProgressReporter>(
    ports: &SshPorts<'_, C, S, R>,
    settings: &SshSettings<'_>,
) -> bool {
    ports.reporter.step("Configuring SSH settings...");
    let path = settings.ssh.sshd_config.as_str();
    let (ok, current) = run_logged(ports.runner, ports.reporter, "cat", &[path], None, None).await;
    if !ok {
        ports
            .reporter
            .warn(&format!("Skipping SSH settings: could not read {path}"));
        return false;
    }

    let updated = apply_directives(&current, &required_directives(settings.ssh.listen_port));
    run_logged(
        ports.runner,
        ports.reporter,
        "sudo",
        &["tee", path],
        Some(updated.as_bytes()),
        None,
    )
    .await
    .0
}

/// Ask for the sudo password up front, with inherited stdio, so the prompt
/// is not drawn over by the busy indicator. Returns whether credentials are
/// now cached.
async fn cache_sudo_credentials<C: CommandRunner, S, R: ProgressReporter>(
    ports: &SshPorts<'_, C, S, R>,
) -> bool {
    ports.reporter.command("sudo -v");
    match ports.runner.run_status("sudo", &["-v"], &[]).await {
        Ok(status) if status.success() => true,
        Ok(status) => {
            tracing::debug!(status = ?status.code(), "sudo -v failed");
            ports.reporter.error("Error:\ncould not obtain sudo credentials");
            false
        }
        Err(e) => {
            ports.reporter.error(&format!("Error:\n{e:#}"));
            false
        }
    }
}

/// `sudo apt ...` with the long apt timeout, behind a busy indicator when
/// `busy` is given.
async fn apt<C: CommandRunner, S, R: ProgressReporter>(
    ports: &SshPorts<'_, C, S, R>,
    args: &[&str],
    busy: Option<&str>,
) -> bool {
    if let Some(message) = busy {
        ports.reporter.begin_busy(message);
    }
    let (ok, _) = run_logged(ports.runner, ports.reporter, "sudo", args, None, Some(APT_TIMEOUT)).await;
    if busy.is_some() {
        ports.reporter.end_busy();
    }
    ok
}

/// Install and configure `openssh-server`, then bind the portproxy.
///
/// # Errors
///
/// Returns an error if the WSL address cannot be determined or the IP cache
/// cannot be written.
pub async fn install_ssh<C: CommandRunner, S: IpStore, R: ProgressReporter>(
    ports: &SshPorts<'_, C, S, R>,
    settings: &SshSettings<'_>,
    username: &str,
    password: &str,
) -> Result<InstallSummary> {
    ports.reporter.step("Installing openssh-server...");
    // Without cached credentials sudo may prompt again, so no spinner.
    let spinner = cache_sudo_credentials(ports).await;

    let updated = apt(
        ports,
        &["apt", "update"],
        spinner.then_some("Updating package lists..."),
    )
    .await;
    if updated {
        apt(
            ports,
            &["apt", "install", "-y", "openssh-server"],
            spinner.then_some("Installing openssh-server..."),
        )
        .await;
    } else {
        ports
            .reporter
            .warn("Skipping openssh-server install: apt update failed");
    }

    ports.reporter.step("Setting user password...");
    let credentials = format!("{username}:{password}\n");
    run_logged(
        ports.runner,
        ports.reporter,
        "sudo",
        &["chpasswd"],
        Some(credentials.as_bytes()),
        None,
    )
    .await;

    configure_sshd(ports, settings).await;
    restart_ssh(ports).await;

    let ip = current_wsl_ip(ports).await?;
    remember_ip(ports, ip)?;
    add_portproxy(ports, settings, ip).await;

    Ok(InstallSummary {
        wsl_ip: ip,
        listen_port: settings.ssh.listen_port,
    })
}

/// Username and password for [`install_ssh`]. Values not supplied are
/// prompted for (the password without echo).
///
/// # Errors
///
/// Returns an error when a value is missing and `non_interactive` is set,
/// or a prompt fails.
pub fn resolve_credentials<P: Prompter, R: ProgressReporter>(
    prompter: &P,
    reporter: &R,
    user: Option<String>,
    password: Option<String>,
    non_interactive: bool,
) -> Result<(String, String)> {
    let user = match user {
        Some(user) => user,
        None if non_interactive => anyhow::bail!("--user is required with --yes"),
        None => prompt_required(prompter, reporter, "Enter your WSL username")?,
    };
    let password = match password {
        Some(password) => password,
        None if non_interactive => {
            anyhow::bail!("--password or WSLKIT_SSH_PASSWORD is required with --yes")
        }
        None => prompter.password("Set a password for this user")?,
    };
    Ok((user, password))
}

/// Re-point the portproxy rule when the WSL address has drifted.
///
/// # Errors
///
/// Returns an error if the WSL address cannot be determined or the IP cache
/// cannot be read or written.
pub async fn update_portproxy<C: CommandRunner, S: IpStore, R: ProgressReporter>(
    ports: &SshPorts<'_, C, S, R>,
    settings: &SshSettings<'_>,
) -> Result<ReconcileOutcome> {
    let current = current_wsl_ip(ports).await?;
    let saved = saved_ip(ports)?;

    match plan_reconcile(saved, current) {
        ReconcilePlan::Unchanged(ip) => {
            ports
                .reporter
                .success(&format!("WSL IP unchanged ({ip}) — nothing to update."));
            Ok(ReconcileOutcome::Unchanged(ip))
        }
        ReconcilePlan::Rebind { previous, current } => {
            let shown = previous.map_or_else(|| "None".to_string(), |ip| ip.to_string());
            ports
                .reporter
                .warn(&format!("WSL IP changed: {shown} → {current}"));
            if let Some(previous) = previous {
                delete_portproxy(ports, settings, previous).await;
            }
            add_portproxy(ports, settings, current).await;
            remember_ip(ports, current)?;
            restart_ssh(ports).await;
            ports.reporter.success("Portproxy re-bound to new IP.");
            Ok(ReconcileOutcome::Rebound { previous, current })
        }
    }
}

/// Remove the portproxy rule and cache (if any) and stop the SSH service.
///
/// # Errors
///
/// Returns an error if the IP cache cannot be read or removed.
pub async fn cleanup_all<C: CommandRunner, S: IpStore, R: ProgressReporter>(
    ports: &SshPorts<'_, C, S, R>,
    settings: &SshSettings<'_>,
) -> Result<CleanupOutcome> {
    let removed_rule = match ports.store.load()? {
        Some(raw) => {
            let ip = parse_stored_ip(&raw).unwrap_or(Ipv4Addr::UNSPECIFIED);
            delete_portproxy(ports, settings, ip).await;
            ports.store.clear()?;
            ports.reporter.success("Portproxy removed.");
            true
        }
        None => false,
    };

    ports.reporter.step("Stopping SSH service...");
    run_logged(
        ports.runner,
        ports.reporter,
        "sudo",
        &["service", "ssh", "stop"],
        None,
        None,
    )
    .await;
    ports.reporter.success("Cleanup complete.");

    Ok(CleanupOutcome { removed_rule })
}

/// Interactive menu: install, rebind, cleanup, exit. Errors from one choice
/// are printed and the menu is shown again; Ctrl-C ends it with `Goodbye!`.
///
/// # Errors
///
/// Returns an error only if reading input fails for a reason other than an
/// interrupt.
pub async fn run_menu<C, S, R, P, V>(
    ports: &SshPorts<'_, C, S, R>,
    settings: &SshSettings<'_>,
    prompter: &P,
    screens: &V,
) -> Result<()>
where
    C: CommandRunner,
    S: IpStore,
    R: ProgressReporter,
    P: Prompter,
    V: MenuScreens,
{
    loop {
        screens.ssh_menu();
        let choice = match prompter.input("Choose an option", None) {
            Ok(choice) => choice,
            Err(e) if is_interrupted(&e) => {
                say_goodbye(ports.reporter);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let result = match choice.as_str() {
            "1" => install_from_menu(ports, settings, prompter, screens).await,
            "2" => update_portproxy(ports, settings).await.map(drop),
            "3" => cleanup_all(ports, settings).await.map(drop),
            "0" => {
                ports.reporter.line("Exiting.");
                return Ok(());
            }
            _ => {
                ports.reporter.warn("Invalid option. Try again.");
                Ok(())
            }
        };

        match result {
            Err(e) if is_interrupted(&e) => {
                say_goodbye(ports.reporter);
                return Ok(());
            }
            Err(e) => ports.reporter.error(&format!("{e:#}")),
            Ok(()) => {}
        }
    }
}

async fn install_from_menu<C, S, R, P, V>(
    ports: &SshPorts<'_, C, S, R>,
    settings: &SshSettings<'_>,
    prompter: &P,
    screens: &V,
) -> Result<()>
where
    C: CommandRunner,
    S: IpStore,
    R: ProgressReporter,
    P: Prompter,
    V: MenuScreens,
{
    let (user, password) = resolve_credentials(prompter, ports.reporter, None, None, false)?;
    let summary = install_ssh(ports, settings, &user, &password).await?;
    screens.ssh_summary(&summary);
    Ok(())
}
