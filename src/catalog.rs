//! The preset catalog: a JSON document of the form `{ "mcps": [Entry, ...] }`.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::entry::Entry;

/// Catalog shipped with the binary, used when no catalog file is configured.
pub const DEFAULT_CATALOG: &str = r#"{
  "mcps": [
    {
      "id": "filesystem",
      "name": "Filesystem",
      "description": "Secure file operations with configurable access controls",
      "command": "npx",
      "args": ["-y", "@modelcontextprotocol/server-filesystem", "."],
      "env": {},
      "category": "core",
      "docsUrl": "https://github.com/modelcontextprotocol/servers/tree/main/src/filesystem"
    },
    {
      "id": "memory",
      "name": "Memory",
      "description": "Knowledge graph based persistent memory",
      "command": "npx",
      "args": ["-y", "@modelcontextprotocol/server-memory"],
      "env": {},
      "category": "core",
      "docsUrl": "https://github.com/modelcontextprotocol/servers/tree/main/src/memory"
    },
    {
      "id": "fetch",
      "name": "Fetch",
      "description": "Web content fetching and conversion for LLM usage",
      "command": "uvx",
      "args": ["mcp-server-fetch"],
      "env": {},
      "category": "core",
      "docsUrl": "https://github.com/modelcontextprotocol/servers/tree/main/src/fetch"
    },
    {
      "id": "github",
      "name": "GitHub",
      "description": "Repository management, file operations and GitHub API integration",
      "command": "npx",
      "args": ["-y", "@modelcontextprotocol/server-github"],
      "env": { "GITHUB_PERSONAL_ACCESS_TOKEN": "" },
      "envVars": [
        {
          "name": "GITHUB_PERSONAL_ACCESS_TOKEN",
          "description": "Personal access token with repo scope",
          "required": true
        }
      ],
      "category": "dev",
      "docsUrl": "https://github.com/modelcontextprotocol/servers/tree/main/src/github"
    },
    {
      "id": "postgres",
      "name": "PostgreSQL",
      "description": "Read-only database access with schema inspection",
      "command": "npx",
      "args": ["-y", "@modelcontextprotocol/server-postgres", "postgresql://localhost/mydb"],
      "env": {},
      "category": "data",
      "docsUrl": "https://github.com/modelcontextprotocol/servers/tree/main/src/postgres"
    },
    {
      "id": "sqlite",
      "name": "SQLite",
      "description": "Database interaction and business intelligence capabilities",
      "command": "uvx",
      "args": ["mcp-server-sqlite", "--db-path", "./data.db"],
      "env": {},
      "category": "data",
      "docsUrl": "https://github.com/modelcontextprotocol/servers/tree/main/src/sqlite"
    },
    {
      "id": "brave-search",
      "name": "Brave Search",
      "description": "Web and local search using Brave's Search API",
      "command": "npx",
      "args": ["-y", "@modelcontextprotocol/server-brave-search"],
      "env": { "BRAVE_API_KEY": "" },
      "envVars": [
        {
          "name": "BRAVE_API_KEY",
          "description": "Brave Search API key",
          "required": true
        }
      ],
      "category": "ai",
      "docsUrl": "https://github.com/modelcontextprotocol/servers/tree/main/src/brave-search"
    },
    {
      "id": "sequential-thinking",
      "name": "Sequential Thinking",
      "description": "Dynamic problem-solving through thought sequences",
      "command": "npx",
      "args": ["-y", "@modelcontextprotocol/server-sequential-thinking"],
      "env": {},
      "category": "ai",
      "docsUrl": "https://github.com/modelcontextprotocol/servers/tree/main/src/sequentialthinking"
    }
  ]
}
"#;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub mcps: Vec<Entry>,
}

/// Where presets are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

impl CatalogSource {
    /// Prefer an explicit path, then `default_path` if it exists, then the
    /// built-in catalog.
    #[must_use]
    pub fn resolve(explicit: Option<PathBuf>, default_path: &Path) -> Self {
        match explicit {
            Some(path) => Self::File(path),
            None if default_path.exists() => Self::File(default_path.to_path_buf()),
            None => Self::Builtin,
        }
    }
}

/// Parse a catalog document.
///
/// # Errors
///
/// Returns an error if the content is not a valid catalog.
pub fn parse_catalog(content: &str) -> anyhow::Result<Vec<Entry>> {
    let catalog: Catalog = serde_json::from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse MCP catalog: {}", e))?;
    Ok(catalog.mcps)
}

/// Read the preset catalog from a JSON file.
///
/// # Errors
///
/// Returns an error if:
/// - Unable to read the file
/// - Unable to parse the JSON content
pub fn read_catalog<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Entry>> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref)
        .with_context(|| format!("Failed to read MCP catalog at {}", path_ref.display()))?;

    parse_catalog(&content)
}

/// Entries of the built-in catalog.
///
/// # Errors
///
/// Returns an error if the embedded catalog does not parse.
pub fn builtin_catalog() -> anyhow::Result<Vec<Entry>> {
    parse_catalog(DEFAULT_CATALOG)
}

/// Load presets, falling back to an empty list when loading fails.
pub fn load_presets(source: &CatalogSource) -> Vec<Entry> {
    let result = match source {
        CatalogSource::Builtin => builtin_catalog(),
        CatalogSource::File(path) => read_catalog(path),
    };

    match result {
        Ok(presets) => {
            debug!("Loaded {} preset MCP(s) from {:?}", presets.len(), source);
            presets
        },
        Err(e) => {
            warn!("Failed to load MCPs: {e:#}");
            Vec::new()
        },
    }
}
