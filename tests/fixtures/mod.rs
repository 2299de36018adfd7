#![allow(dead_code)]

use indexmap::IndexMap;
use mcpgen::entry::{Category, Entry, EnvVarSpec};
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

/// Preset entry with the given base environment
pub fn preset(id: &str, env: &[(&str, &str)]) -> Entry {
    Entry {
        id: id.to_string(),
        name: id.to_string(),
        description: format!("{id} MCP server"),
        command: "npx".to_string(),
        args: vec!["-y".to_string(), format!("@example/{id}")],
        env: env.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect(),
        env_vars: env
            .iter()
            .map(|(k, _)| EnvVarSpec {
                name: (*k).to_string(),
                description: String::new(),
                required: true,
                default: None,
            })
            .collect(),
        category: Category::Core,
        docs_url: None,
        is_custom: false,
    }
}

/// Custom entry with a fixed id
pub fn custom(id: &str) -> Entry {
    Entry { category: Category::Custom, is_custom: true, ..preset(id, &[]) }
}

pub fn env_map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

/// Temporary `XDG_CONFIG_HOME` with an `mcpgen` directory inside
pub struct TestFixture {
    /// Temporary directory that will be cleaned up on drop
    pub temp: TempDir,
    /// Path to the config directory (`XDG_CONFIG_HOME/mcpgen`)
    pub config: PathBuf,
    /// Scratch directory for generated files
    pub output: PathBuf,
}

impl TestFixture {
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = tempdir()?;
        let config_dir = temp_dir.path().join("config").join("mcpgen");
        let output_dir = temp_dir.path().join("out");

        fs::create_dir_all(&config_dir)?;

        Ok(Self { temp: temp_dir, config: config_dir, output: output_dir })
    }

    /// Get the config home directory (parent of the mcpgen config)
    pub fn config_home(&self) -> PathBuf {
        self.config.parent().unwrap().to_path_buf()
    }

    /// Write a catalog.json into the config directory
    pub fn with_catalog(&self, content: &str) -> std::io::Result<&Self> {
        fs::write(self.config.join("catalog.json"), content)?;
        Ok(self)
    }

    /// Write the persisted custom entries
    pub fn with_customs(&self, content: &str) -> std::io::Result<&Self> {
        fs::write(self.config.join("custom-mcps.json"), content)?;
        Ok(self)
    }

    pub fn read_customs(&self) -> std::io::Result<String> {
        fs::read_to_string(self.config.join("custom-mcps.json"))
    }
}

/// Catalog used by the CLI tests
pub const TEST_CATALOG: &str = r#"{
  "mcps": [
    {
      "id": "filesystem",
      "name": "Filesystem",
      "description": "File operations",
      "command": "npx",
      "args": ["-y", "@modelcontextprotocol/server-filesystem"],
      "env": {},
      "category": "core"
    },
    {
      "id": "github",
      "name": "GitHub",
      "description": "Repository management",
      "command": "npx",
      "args": ["-y", "@modelcontextprotocol/server-github"],
      "env": { "GITHUB_TOKEN": "", "GITHUB_HOST": "github.com" },
      "envVars": [
        { "name": "GITHUB_TOKEN", "description": "Personal access token", "required": true }
      ],
      "category": "dev"
    }
  ]
}"#;
