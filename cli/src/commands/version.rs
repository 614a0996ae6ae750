//! `wslkit version`

use std::process::ExitCode;

use anyhow::Result;

use crate::output::{HumanRenderer, OutputContext, json};

/// Run the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(ctx: &OutputContext, as_json: bool) -> Result<ExitCode> {
    let version = env!("CARGO_PKG_VERSION");
    let build_date = env!("WSLKIT_BUILD_DATE");

    if as_json {
        json::print(&serde_json::json!({
            "version": version,
            "build_date": build_date,
        }))?;
    } else {
        HumanRenderer::new(ctx).render_version(version, build_date);
    }
    Ok(ExitCode::SUCCESS)
}
