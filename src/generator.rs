//! Turns the current selections into a target-shaped MCP configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::selection::Selection;
use crate::Result;

/// Where the generated configuration will be used.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigTarget {
    /// A standalone `mcp.json` file (Cursor).
    #[default]
    #[value(alias = "cursor")]
    #[serde(alias = "cursor")]
    Standalone,
    /// A block embedded in the editor's `settings.json` (VS Code).
    #[value(alias = "vscode")]
    #[serde(alias = "vscode")]
    EditorSettings,
}

impl ConfigTarget {
    /// File name used when the configuration is downloaded.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Standalone => "mcp.json",
            Self::EditorSettings => "settings-mcp-snippet.json",
        }
    }

    /// Name of the host application consuming this target.
    #[must_use]
    pub const fn app_name(self) -> &'static str {
        match self {
            Self::Standalone => "Cursor",
            Self::EditorSettings => "VS Code",
        }
    }
}

/// Launch record for one server in the generated configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerRecord {
    pub command: String,
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct McpServersConfig {
    #[serde(rename = "mcpServers")]
    pub mcp_servers: IndexMap<String, ServerRecord>,
}

/// Generated configuration in the shape expected by a [`ConfigTarget`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ConfigDocument {
    /// `{ "mcpServers": { ... } }`
    Standalone(McpServersConfig),
    /// `{ "mcp": { "mcpServers": { ... } } }`
    EditorSettings { mcp: McpServersConfig },
}

impl ConfigDocument {
    #[must_use]
    pub const fn servers(&self) -> &McpServersConfig {
        match self {
            Self::Standalone(servers) | Self::EditorSettings { mcp: servers } => servers,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.servers().mcp_servers.is_empty()
    }
}

/// Build the launch record for a selection.
///
/// Overrides win over base values; keys whose final value is empty are
/// dropped, and an empty environment is omitted.
#[must_use]
pub fn server_record(selection: &Selection) -> ServerRecord {
    let env: IndexMap<String, String> =
        selection.merged_env().into_iter().filter(|(_, value)| !value.is_empty()).collect();

    ServerRecord {
        command: selection.entry.command.clone(),
        args: selection.entry.args.clone(),
        env: (!env.is_empty()).then_some(env),
    }
}

/// Build the configuration for every selected entry, in selection order.
#[must_use]
pub fn generate(selections: &[Selection], target: ConfigTarget) -> ConfigDocument {
    let mcp_servers: IndexMap<String, ServerRecord> = selections
        .iter()
        .filter(|selection| selection.selected)
        .map(|selection| (selection.id().to_string(), server_record(selection)))
        .collect();

    debug!("Generated {} server(s) for {:?}", mcp_servers.len(), target);

    let servers = McpServersConfig { mcp_servers };
    match target {
        ConfigTarget::Standalone => ConfigDocument::Standalone(servers),
        ConfigTarget::EditorSettings => ConfigDocument::EditorSettings { mcp: servers },
    }
}

/// Serialize a document as 2-space indented JSON, keeping insertion order.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(document: &ConfigDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// [`generate`] followed by [`render`].
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn generate_string(selections: &[Selection], target: ConfigTarget) -> Result<String> {
    render(&generate(selections, target))
}
