//! WSL network identity and Windows portproxy rules.
//!
//! The WSL VM gets a new address on most restarts; the Windows side keeps a
//! `netsh interface portproxy` rule pointing at the last address we saw.
//! Everything here is pure: parsing command output, deciding what to change,
//! and rendering the `netsh` command lines.

use std::net::Ipv4Addr;

use crate::domain::error::NetworkError;

/// A Windows `netsh interface portproxy v4tov4` rule forwarding into WSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortProxyRule {
    pub listen_address: Ipv4Addr,
    pub listen_port: u16,
    pub connect_address: Ipv4Addr,
    pub connect_port: u16,
}

/// Where a freshly installed SSH server can be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSummary {
    pub wsl_ip: Ipv4Addr,
    pub listen_port: u16,
}

/// The WSL address is the first token of `hostname -I`.
///
/// # Errors
///
/// Returns [`NetworkError::NoAddress`] on empty output and
/// [`NetworkError::NotIpv4`] when the first token is not an IPv4 address.
pub fn parse_hostname_ips(output: &str) -> Result<Ipv4Addr, NetworkError> {
    let first = output.split_whitespace().next().ok_or(NetworkError::NoAddress)?;
    first
        .parse()
        .map_err(|_| NetworkError::NotIpv4(first.to_string()))
}

/// Parse the contents of the IP cache file. Empty or unparsable contents
/// yield `None`.
#[must_use]
pub fn parse_stored_ip(contents: &str) -> Option<Ipv4Addr> {
    contents.trim().parse().ok()
}

/// What `update` has to do to bring the portproxy rule in line with WSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePlan {
    /// Cached address matches the live one; nothing to touch.
    Unchanged(Ipv4Addr),
    /// Re-point the rule. `previous` is `None` on first run, in which case
    /// there is no old rule to delete.
    Rebind {
        previous: Option<Ipv4Addr>,
        current: Ipv4Addr,
    },
}

#[must_use]
pub fn plan_reconcile(saved: Option<Ipv4Addr>, current: Ipv4Addr) -> ReconcilePlan {
    match saved {
        Some(previous) if previous == current => ReconcilePlan::Unchanged(current),
        previous => ReconcilePlan::Rebind { previous, current },
    }
}

/// Rule forwarding `listen_address:port` on Windows to the same port in WSL.
#[must_use]
pub fn wsl_rule(listen_address: Ipv4Addr, port: u16, wsl_ip: Ipv4Addr) -> PortProxyRule {
    PortProxyRule {
        listen_address,
        listen_port: port,
        connect_address: wsl_ip,
        connect_port: port,
    }
}

#[must_use]
pub fn netsh_add(rule: &PortProxyRule) -> String {
    format!(
        "netsh interface portproxy add v4tov4 listenport={} listenaddress={} connectport={} connectaddress={}",
        rule.listen_port, rule.listen_address, rule.connect_port, rule.connect_address
    )
}

/// Deleting is keyed by the listen side only.
#[must_use]
pub fn netsh_delete(listen_address: Ipv4Addr, listen_port: u16) -> String {
    format!(
        "netsh interface portproxy delete v4tov4 listenport={listen_port} listenaddress={listen_address}"
    )
}
