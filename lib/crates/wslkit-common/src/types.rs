use std::fmt;

use serde::{Deserialize, Serialize};

/// Action understood by the PowerShell window helper (`-Action <name>`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WindowAction {
    List,
    Minimize,
    Maximize,
    Restore,
    Close,
    Focus,
    Toggle,
}

impl WindowAction {
    /// Every action that targets a single window by index.
    pub const TARGETED: [WindowAction; 6] = [
        WindowAction::Minimize,
        WindowAction::Maximize,
        WindowAction::Restore,
        WindowAction::Close,
        WindowAction::Focus,
        WindowAction::Toggle,
    ];

    /// Value passed to the helper script's `-Action` parameter.
    #[must_use]
    pub fn script_name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
            Self::Restore => "restore",
            Self::Close => "close",
            Self::Focus => "focus",
            Self::Toggle => "toggle",
        }
    }

    /// Short verb typed at the interactive prompt (`min 3`, `max 3`, ...).
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Minimize => "min",
            Self::Maximize => "max",
            Self::Restore => "restore",
            Self::Close => "close",
            Self::Focus => "focus",
            Self::Toggle => "toggle",
        }
    }

    /// Whether the action needs `-WindowIndex`.
    #[must_use]
    pub fn needs_index(self) -> bool {
        !matches!(self, Self::List)
    }
}

impl fmt::Display for WindowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.script_name())
    }
}

/// One row of the helper script's `list` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowInfo {
    pub index: u32,
    pub title: String,
    pub process: String,
    pub state: String,
}

/// Direction of an SCP transfer relative to the local machine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    Download,
    Upload,
}

impl TransferDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Upload => "upload",
        }
    }
}
