//! Embedded assets — the PowerShell window helper compiled into the binary.
//!
//! At compile time, `include_dir!` embeds everything under `cli/assets/`:
//!   - `window_manager.ps1` — run by `powershell.exe -File` for `wslkit windows`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use include_dir::{Dir, include_dir};

use crate::domain::error::WindowError;
use crate::infra::fs::expand_home;

static EMBEDDED_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

pub const WINDOW_SCRIPT: &str = "window_manager.ps1";

/// Return the raw bytes of a single embedded asset without extracting to disk.
///
/// # Errors
///
/// Returns an error if no asset with the given `name` exists.
pub fn get_asset(name: &str) -> Result<&'static [u8]> {
    EMBEDDED_ASSETS
        .get_file(name)
        .map(|f| f.contents())
        .ok_or_else(|| anyhow::anyhow!("embedded asset not found: {name}"))
}

/// Resolve the window helper on disk.
///
/// A configured path must exist. Without one, the embedded copy is written
/// to `dir/window_manager.ps1`, refreshing it when the contents differ.
///
/// # Errors
///
/// Returns [`WindowError::ScriptNotFound`] for a missing configured path, or
/// an I/O error if the embedded copy cannot be written.
pub fn ensure_window_script(configured: Option<&str>, dir: &Path) -> Result<PathBuf> {
    if let Some(configured) = configured {
        let path = PathBuf::from(expand_home(configured));
        if !path.is_file() {
            return Err(WindowError::ScriptNotFound(path).into());
        }
        return Ok(path);
    }

    let bytes = get_asset(WINDOW_SCRIPT)?;
    let path = dir.join(WINDOW_SCRIPT);
    let current = std::fs::read(&path).ok();
    if current.as_deref() != Some(bytes) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating directory {}", dir.display()))?;
        std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "extracted window helper");
    }
    Ok(path)
}
