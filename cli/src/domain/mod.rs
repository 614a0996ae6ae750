//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`
//! sockets. All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod network;
pub mod shell;
pub mod sshd;
pub mod transfer;
pub mod windows;

pub use config::{WslkitConfig, apply_setting, validate_config_key, validate_config_value};
pub use error::{
    ConfigError, NetworkError, ProcessError, PromptError, TransferError, WindowError, is_interrupted,
};
pub use network::ReconcilePlan;
