//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::application::ports::MenuScreens;
use crate::domain::config::WslkitConfig;
use crate::domain::network::InstallSummary;
use crate::output::OutputContext;

/// Renders menus, banners and summaries as human-readable terminal output
/// using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str, build_date: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("wslkit {version} ({build_date})");
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &WslkitConfig, path: &std::path::Path) {
        let s = &self.ctx.styles;
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(s.header)
        );
        println!();
        println!("  {:<24} {}", "powershell.path:", config.powershell.path);
        println!("  {:<24} {}", "wsl.distro:", config.wsl.distro);
        println!("  {:<24} {}", "exec.display:", config.exec.display);
        println!("  {:<24} {}", "transfer.default_port:", config.transfer.default_port);
        println!(
            "  {:<24} {}",
            "windows.script:",
            config.windows.script.as_deref().unwrap_or("(bundled)")
        );
        println!("  {:<24} {}", "ssh.listen_port:", config.ssh.listen_port);
        println!("  {:<24} {}", "ssh.listen_address:", config.ssh.listen_address);
        println!("  {:<24} {}", "ssh.ip_store:", config.ssh.ip_store);
        println!("  {:<24} {}", "ssh.sshd_config:", config.ssh.sshd_config);

        println!();
        println!("  {}", "Projects:".style(s.bold));
        if config.projects.is_empty() {
            println!("    {}", "(none)".style(s.dim));
        }
        for (name, dir) in &config.projects {
            println!("    {:<22} {dir}", format!("{name}:"));
        }

        println!();
        println!("  {}", "Environment:".style(s.bold));
        for var in ["WSLKIT_CONFIG", "WSLKIT_LOG", "NO_COLOR"] {
            println!(
                "    {:<22} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}

impl MenuScreens for HumanRenderer<'_> {
    // ── transfer ─────────────────────────────────────────────────────────────

    fn transfer_banner(&self) {
        if self.ctx.quiet {
            return;
        }
        let s = &self.ctx.styles;
        let rule = "═".repeat(60);
        println!();
        println!("{}", format!("╔{rule}╗").style(s.header));
        println!(
            "{}{}{}",
            "║".style(s.header),
            format!("{:^60}", "SSH File Transfer Tool").style(s.success),
            "║".style(s.header)
        );
        println!(
            "{}{}{}",
            "║".style(s.header),
            format!("{:^60}", "Powered by SCP").style(s.warning),
            "║".style(s.header)
        );
        println!("{}", format!("╚{rule}╝").style(s.header));
    }

    fn transfer_menu(&self) {
        if self.ctx.quiet {
            return;
        }
        let s = &self.ctx.styles;
        println!();
        println!("{}", "Choose an option:".style(s.header));
        for (key, label) in [
            ("1.", "Download file from SSH server"),
            ("2.", "Upload file to SSH server"),
            ("3.", "Show help & tips"),
            ("4.", "Exit"),
        ] {
            println!("  {} {label}", key.style(s.bold));
        }
    }

    fn transfer_tips(&self) {
        let s = &self.ctx.styles;
        println!();
        println!("{}", "HELP & TIPS".style(s.header));
        println!();
        println!("{}", "Common Usage Examples:".style(s.bold));
        println!("  • Remote path: {}", "/home/user/document.txt".style(s.success));
        println!(
            "  • Local path:  {} or {}",
            "~/Downloads/".style(s.success),
            "/mnt/c/Users/you/Desktop/".style(s.success)
        );
        println!();
        println!("{}", "Path Expansion:".style(s.bold));
        println!("  • {} expands to your home directory", "~".style(s.success));
        println!(
            "  • {} becomes {}",
            "~/Downloads/".style(s.success),
            "/home/yourname/Downloads/".style(s.success)
        );
        println!(
            "  • Environment variables like {} are also expanded",
            "$HOME".style(s.success)
        );
        println!();
        println!("{}", "SSH Connection:".style(s.bold));
        println!("  • Make sure you can SSH to the server first");
        println!("  • Use SSH keys for passwordless authentication");
        println!("  • Default SSH port is 22 (see `wslkit config set transfer.default_port`)");
        println!();
        println!("{}", "File Paths:".style(s.bold));
        println!("  • Use absolute paths when in doubt");
        println!("  • For directories, ensure they exist on the destination");
        println!("  • Use quotes for paths with spaces");
    }

    // ── ssh ──────────────────────────────────────────────────────────────────

    fn ssh_menu(&self) {
        let s = &self.ctx.styles;
        println!();
        println!("{}", "=== WSL SSH + Portproxy Manager ===".style(s.header));
        println!();
        println!("{}", "Warning: Run this in Administrator.".style(s.warning));
        println!("1. Install & configure SSH (with portproxy)");
        println!("2. Rebind portproxy if WSL IP has changed");
        println!("3. Remove SSH & portproxy configuration");
        println!("0. Exit");
    }

    fn ssh_summary(&self, summary: &InstallSummary) {
        if self.ctx.quiet {
            return;
        }
        let port = summary.listen_port;
        println!();
        self.ctx.success("SSH is set up and forwarded!");
        println!("    ➤ WSL IP: {}", summary.wsl_ip.style(self.ctx.styles.value));
        println!("    ➤ Windows Port: {port} → WSL {port}");
        println!("    ➤ Test: ssh youruser@localhost -p {port}");
        println!("    ➤ Or from another device via the host's Tailscale IP");
    }
}
