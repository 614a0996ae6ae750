//! Filesystem infrastructure — implements `LocalFs` against the host.

use std::path::Path;

use crate::application::ports::LocalFs;
use crate::domain::transfer::expand_path;

/// Production filesystem implementation of `LocalFs`.
pub struct HostFs;

impl LocalFs for HostFs {
    fn expand(&self, path: &str) -> String {
        let home = dirs::home_dir();
        expand_path(path, home.as_deref(), |name| std::env::var(name).ok())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn file_size(&self, path: &Path) -> Option<u64> {
        std::fs::metadata(path).ok().map(|m| m.len())
    }
}

/// Expand a leading `~` only; `$VAR` is left alone.
#[must_use]
pub fn expand_home(path: &str) -> String {
    let home = dirs::home_dir();
    expand_path(path, home.as_deref(), |_| None)
}
