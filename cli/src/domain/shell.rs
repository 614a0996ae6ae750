//! Command-line construction for bash, PowerShell and display purposes.

/// Quote `value` for POSIX shells: wrap in single quotes, escaping embedded
/// single quotes as `'\''`.
#[must_use]
pub fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// `cd '<dir>' && <cmd>` — the user's command is passed through verbatim.
#[must_use]
pub fn cd_and_run(dir: &str, cmd: &str) -> String {
    format!("cd {} && {cmd}", single_quote(dir))
}

/// `export DISPLAY=<display> && cd '<dir>' && <cmd>` for GUI programs run from WSL.
#[must_use]
pub fn with_display(display: &str, dir: &str, cmd: &str) -> String {
    format!("export DISPLAY={display} && {}", cd_and_run(dir, cmd))
}

/// Escape text for a double-quoted PowerShell string that is then handed to
/// a native executable.
///
/// Backtick and `$` are escaped so PowerShell does not interpolate them;
/// `"` becomes `\""` so it survives both PowerShell and the native
/// command-line parser as a literal quote.
#[must_use]
pub fn powershell_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '`' => out.push_str("``"),
            '$' => out.push_str("`$"),
            '"' => out.push_str("\\\"\""),
            _ => out.push(c),
        }
    }
    out
}

/// PowerShell `-Command` body that runs `bash_cmd` inside the given WSL distro.
#[must_use]
pub fn wsl_bash_command(distro: &str, bash_cmd: &str) -> String {
    format!(
        "wsl.exe -d {distro} -- bash -c \"{}\"",
        powershell_escape(bash_cmd)
    )
}

/// Render `program args...` for echoing to the user. Arguments containing
/// whitespace or quotes are shown single-quoted.
#[must_use]
pub fn display_command(program: &str, args: &[&str]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(program.to_string());
    for arg in args {
        if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
            parts.push(single_quote(arg));
        } else {
            parts.push((*arg).to_string());
        }
    }
    parts.join(" ")
}
