//! Unit tests for the configuration use-cases.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::cell::RefCell;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use anyhow::Result;
use wslkit_cli::application::ports::ConfigStore;
use wslkit_cli::application::services::config_service::{load_config, set_value};
use wslkit_cli::domain::{ConfigError, WslkitConfig};

#[derive(Default)]
struct MemConfigStore {
    config: RefCell<WslkitConfig>,
    saves: RefCell<usize>,
}

impl ConfigStore for MemConfigStore {
    fn load(&self) -> Result<WslkitConfig> {
        Ok(self.config.borrow().clone())
    }
    fn save(&self, config: &WslkitConfig) -> Result<()> {
        *self.config.borrow_mut() = config.clone();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/mem/config.yaml"))
    }
}

#[test]
fn set_value_persists_typed_settings() {
    let store = MemConfigStore::default();

    set_value(&store, "ssh.listen_port", "2022").unwrap();
    set_value(&store, "ssh.listen_address", "127.0.0.1").unwrap();
    set_value(&store, "projects.xpal", "/home/me/git/xpal").unwrap();

    let config = load_config(&store).unwrap();
    assert_eq!(config.ssh.listen_port, 2022);
    assert_eq!(config.ssh.listen_address, Ipv4Addr::LOCALHOST);
    assert_eq!(config.projects["xpal"], "/home/me/git/xpal");
    assert_eq!(*store.saves.borrow(), 3);
}

#[test]
fn invalid_settings_are_not_saved() {
    let store = MemConfigStore::default();

    let err = set_value(&store, "ssh.listen_port", "0").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidValue { .. })
    ));

    let err = set_value(&store, "nope.key", "x").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::UnknownKey { .. })
    ));

    assert_eq!(*store.saves.borrow(), 0);
    assert_eq!(load_config(&store).unwrap(), WslkitConfig::default());
}

#[test]
fn empty_window_script_clears_override() {
    let store = MemConfigStore::default();

    set_value(&store, "windows.script", "/mnt/c/tools/wm.ps1").unwrap();
    assert_eq!(
        load_config(&store).unwrap().windows.script.as_deref(),
        Some("/mnt/c/tools/wm.ps1")
    );

    set_value(&store, "windows.script", "").unwrap();
    assert_eq!(load_config(&store).unwrap().windows.script, None);
}
