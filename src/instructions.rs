//! Setup steps shown next to a generated configuration.

use crate::generator::ConfigTarget;
use crate::paths::{resolve_path, OperatingSystem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupStep {
    pub number: usize,
    pub title: String,
    pub body: String,
    /// Path or shell snippet the user is expected to copy.
    pub snippet: Option<String>,
    pub completed: bool,
}

/// Command (or key sequence) that opens the configuration location.
#[must_use]
pub const fn open_location_hint(target: ConfigTarget, os: OperatingSystem) -> &'static str {
    match (target, os) {
        (ConfigTarget::Standalone, OperatingSystem::MacOs) => "open ~/.cursor",
        (ConfigTarget::Standalone, OperatingSystem::Windows) => r"explorer %APPDATA%\Cursor",
        (ConfigTarget::Standalone, OperatingSystem::Linux) => "xdg-open ~/.config/cursor",
        (ConfigTarget::EditorSettings, OperatingSystem::MacOs) => {
            "⌘+Shift+P → \"Preferences: Open User Settings (JSON)\""
        },
        (ConfigTarget::EditorSettings, _) => {
            "Ctrl+Shift+P → \"Preferences: Open User Settings (JSON)\""
        },
    }
}

#[must_use]
pub fn setup_steps(target: ConfigTarget, os: OperatingSystem, has_selections: bool) -> Vec<SetupStep> {
    let app = target.app_name();

    let (save_title, save_body, open_title, open_body) = match target {
        ConfigTarget::Standalone => (
            "Create the config file",
            "Copy the generated JSON and save it to:",
            "Open config location",
            "You can quickly open the config directory using the terminal:",
        ),
        ConfigTarget::EditorSettings => (
            "Update settings.json",
            "Add the MCP configuration to your VS Code settings.json:",
            "Open settings",
            "Open settings.json using the Command Palette:",
        ),
    };

    let env_hint = match os {
        OperatingSystem::MacOs | OperatingSystem::Linux => {
            " Add them to your ~/.zshrc or ~/.bashrc file."
        },
        OperatingSystem::Windows => " Set them in System Properties → Environment Variables.",
    };

    vec![
        SetupStep {
            number: 1,
            title: "Select MCPs".to_string(),
            body: "Choose the MCP servers you want to enable. Configure any required environment variables.".to_string(),
            snippet: None,
            completed: has_selections,
        },
        SetupStep {
            number: 2,
            title: save_title.to_string(),
            body: save_body.to_string(),
            snippet: Some(resolve_path(target, os).to_string()),
            completed: false,
        },
        SetupStep {
            number: 3,
            title: open_title.to_string(),
            body: open_body.to_string(),
            snippet: Some(open_location_hint(target, os).to_string()),
            completed: false,
        },
        SetupStep {
            number: 4,
            title: "Set environment variables".to_string(),
            body: format!(
                "If any of your selected MCPs require API keys or tokens, make sure they're set in your environment or directly in the config.{env_hint}"
            ),
            snippet: None,
            completed: false,
        },
        SetupStep {
            number: 5,
            title: format!("Restart {app}"),
            body: format!(
                "Restart {app} to load the new MCP configuration. Your MCP servers will start automatically when the editor launches."
            ),
            snippet: None,
            completed: false,
        },
    ]
}
