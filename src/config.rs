#![allow(clippy::self_named_module_files)]

use std::path::PathBuf;

use crate::storage::FileStore;

pub mod writer;

#[derive(Debug, Clone)]
pub struct Config {
    /// `$XDG_CONFIG_HOME/mcpgen` or `~/.config/mcpgen`
    pub config_dir: PathBuf,
    /// Default preset catalog location
    pub catalog_path: PathBuf,
    /// Directory holding the custom-entry store
    pub store_dir: PathBuf,
}

impl Config {
    /// Creates a new Config instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::with_dir(Self::get_config_dir()?))
    }

    pub fn with_dir<P: Into<PathBuf>>(config_dir: P) -> Self {
        let config_dir = config_dir.into();
        Self {
            catalog_path: config_dir.join("catalog.json"),
            store_dir: config_dir.clone(),
            config_dir,
        }
    }

    /// Store backing the persisted custom entries.
    #[must_use]
    pub fn custom_store(&self) -> FileStore {
        FileStore::new(&self.store_dir)
    }

    /// Gets the configuration directory path.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn get_config_dir() -> anyhow::Result<PathBuf> {
        // Use XDG_CONFIG_HOME or fallback to ~/.config
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config).join("mcpgen")
        } else {
            directories::BaseDirs::new()
                .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
                .home_dir()
                .join(".config")
                .join("mcpgen")
        };
        Ok(config_dir)
    }
}
