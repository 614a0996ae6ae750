//! `sshd_config` rewriting.
//!
//! Each directive replaces every line matching `^#*<Key> ` (commented-out
//! defaults included). Directives with no matching line are appended.

use regex::Regex;

/// Directives wslkit enforces for password logins over the forwarded port.
#[must_use]
pub fn required_directives(port: u16) -> Vec<(&'static str, String)> {
    vec![
        ("Port", port.to_string()),
        ("PasswordAuthentication", "yes".to_string()),
        ("PermitRootLogin", "yes".to_string()),
    ]
}

/// Return `content` with each `(key, value)` directive applied.
#[must_use]
pub fn apply_directives(content: &str, directives: &[(&str, String)]) -> String {
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    for (key, value) in directives {
        let replacement = format!("{key} {value}");
        let Ok(pattern) = Regex::new(&format!("^#*{} ", regex::escape(key))) else {
            continue;
        };

        let mut matched = false;
        for line in &mut lines {
            if pattern.is_match(line) {
                line.clone_from(&replacement);
                matched = true;
            }
        }
        if !matched {
            lines.push(replacement);
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
