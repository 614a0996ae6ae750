//! Infrastructure implementation of the `IpStore` port.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::IpStore;
use crate::infra::fs::expand_home;

/// One-line cache file holding the WSL address the portproxy points at.
pub struct FileIpStore {
    path: PathBuf,
}

impl FileIpStore {
    /// Store at `path`; a leading `~` is expanded to the home directory.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(expand_home(path)),
        }
    }
}

impl IpStore for FileIpStore {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let trimmed = content.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    fn save(&self, ip: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        std::fs::write(&self.path, ip).with_context(|| format!("writing {}", self.path.display()))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", self.path.display())),
        }
    }
}
