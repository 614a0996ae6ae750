//! Domain types and validators for wslkit configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::transfer::parse_port;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "powershell.path",
    "wsl.distro",
    "exec.display",
    "transfer.default_port",
    "windows.script",
    "ssh.listen_port",
    "ssh.listen_address",
    "ssh.ip_store",
    "ssh.sshd_config",
    "projects.<name>",
];

/// PowerShell as seen from inside WSL.
pub const DEFAULT_POWERSHELL: &str =
    "/mnt/c/Windows/System32/WindowsPowerShell/v1.0/powershell.exe";
pub const DEFAULT_DISTRO: &str = "Ubuntu";
pub const DEFAULT_DISPLAY: &str = ":0";
pub const DEFAULT_SCP_PORT: u16 = 22;
pub const DEFAULT_SSH_LISTEN_PORT: u16 = 2222;
pub const DEFAULT_SSH_LISTEN_ADDRESS: Ipv4Addr = Ipv4Addr::UNSPECIFIED;
pub const DEFAULT_IP_STORE: &str = "~/.wsl_ssh_ip";
pub const DEFAULT_SSHD_CONFIG: &str = "/etc/ssh/sshd_config";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.wslkit/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WslkitConfig {
    pub powershell: PowershellConfig,
    pub wsl: WslConfig,
    pub exec: ExecConfig,
    pub transfer: TransferConfig,
    pub windows: WindowsConfig,
    pub ssh: SshConfig,
    /// Project name → working directory inside WSL, offered by `wslkit run`.
    pub projects: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PowershellConfig {
    pub path: String,
}

impl Default for PowershellConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_POWERSHELL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WslConfig {
    pub distro: String,
}

impl Default for WslConfig {
    fn default() -> Self {
        Self {
            distro: DEFAULT_DISTRO.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExecConfig {
    /// X display exported before the command runs (WSLg / VcXsrv).
    pub display: String,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            display: DEFAULT_DISPLAY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransferConfig {
    pub default_port: u16,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            default_port: DEFAULT_SCP_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WindowsConfig {
    /// Explicit helper script; the bundled copy is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SshConfig {
    pub listen_port: u16,
    pub listen_address: Ipv4Addr,
    pub ip_store: String,
    pub sshd_config: String,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_SSH_LISTEN_PORT,
            listen_address: DEFAULT_SSH_LISTEN_ADDRESS,
            ip_store: DEFAULT_IP_STORE.to_string(),
            sshd_config: DEFAULT_SSHD_CONFIG.to_string(),
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Returns the project name for a `projects.<name>` key.
fn project_key(key: &str) -> Option<&str> {
    key.strip_prefix("projects.").filter(|name| {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if project_key(key).is_some() || (VALID_CONFIG_KEYS.contains(&key) && !key.contains('<')) {
        return Ok(());
    }
    Err(ConfigError::UnknownKey {
        key: key.to_string(),
        valid: VALID_CONFIG_KEYS.join(", "),
    }
    .into())
}

fn invalid(key: &str, value: &str, reason: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    match key {
        "transfer.default_port" | "ssh.listen_port" => {
            parse_port(value).map_err(|_| invalid(key, value, "Expected a port between 1 and 65535"))?;
        }
        "ssh.listen_address" => {
            value
                .parse::<Ipv4Addr>()
                .map_err(|_| invalid(key, value, "Expected an IPv4 address such as 0.0.0.0"))?;
        }
        "windows.script" => {}
        _ => {
            if value.trim().is_empty() {
                return Err(invalid(key, value, "Value must not be empty"));
            }
        }
    }
    Ok(())
}

/// Applies a validated `key = value` setting to `config`.
///
/// An empty value for `windows.script` clears the override.
///
/// # Errors
///
/// Returns an error if the key or value is invalid.
pub fn apply_setting(config: &mut WslkitConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;

    if let Some(name) = project_key(key) {
        config.projects.insert(name.to_string(), value.to_string());
        return Ok(());
    }

    match key {
        "powershell.path" => config.powershell.path = value.to_string(),
        "wsl.distro" => config.wsl.distro = value.to_string(),
        "exec.display" => config.exec.display = value.to_string(),
        "transfer.default_port" => config.transfer.default_port = parse_port(value)?,
        "windows.script" => {
            config.windows.script = Some(value.trim().to_string()).filter(|v| !v.is_empty());
        }
        "ssh.listen_port" => config.ssh.listen_port = parse_port(value)?,
        "ssh.listen_address" => config.ssh.listen_address = value.parse()?,
        "ssh.ip_store" => config.ssh.ip_store = value.to_string(),
        "ssh.sshd_config" => config.ssh.sshd_config = value.to_string(),
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
