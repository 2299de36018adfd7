use serde::{Deserialize, Serialize};

use crate::generator::ConfigTarget;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    #[value(name = "macos", alias = "mac")]
    MacOs,
    Windows,
    Linux,
}

impl OperatingSystem {
    pub const ALL: [Self; 3] = [Self::MacOs, Self::Windows, Self::Linux];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MacOs => "macOS",
            Self::Windows => "Windows",
            Self::Linux => "Linux",
        }
    }

    /// The operating system this binary was built for.
    #[must_use]
    pub const fn current() -> Self {
        current_os()
    }
}

/// Canonical location of the configuration file for `target` on `os`.
#[must_use]
pub const fn resolve_path(target: ConfigTarget, os: OperatingSystem) -> &'static str {
    match (target, os) {
        (ConfigTarget::Standalone, OperatingSystem::MacOs) => "~/.cursor/mcp.json",
        (ConfigTarget::Standalone, OperatingSystem::Windows) => r"%APPDATA%\Cursor\mcp.json",
        (ConfigTarget::Standalone, OperatingSystem::Linux) => "~/.config/cursor/mcp.json",
        (ConfigTarget::EditorSettings, OperatingSystem::MacOs) => {
            "~/Library/Application Support/Code/User/settings.json"
        },
        (ConfigTarget::EditorSettings, OperatingSystem::Windows) => {
            r"%APPDATA%\Code\User\settings.json"
        },
        (ConfigTarget::EditorSettings, OperatingSystem::Linux) => {
            "~/.config/Code/User/settings.json"
        },
    }
}

#[cfg(target_os = "macos")]
const fn current_os() -> OperatingSystem {
    OperatingSystem::MacOs
}

#[cfg(windows)]
const fn current_os() -> OperatingSystem {
    OperatingSystem::Windows
}

#[cfg(not(any(target_os = "macos", windows)))]
const fn current_os() -> OperatingSystem {
    OperatingSystem::Linux
}
