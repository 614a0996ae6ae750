//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{WslkitConfig, apply_setting};

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<WslkitConfig> {
    store.load()
}

/// Validate and persist a single `key = value` setting. Returns the
/// updated configuration.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the store fails.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<WslkitConfig> {
    let mut config = store.load()?;
    apply_setting(&mut config, key, value)?;
    store.save(&config)?;
    tracing::info!(key, "configuration updated");
    Ok(config)
}
