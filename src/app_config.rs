use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::generator::ConfigTarget;
use crate::paths::OperatingSystem;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AppConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct DefaultConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ConfigTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<OperatingSystem>,
    /// Catalog file used instead of `catalog.json` in the config directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl AppConfig {
    /// Load the application configuration from the default path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Unable to determine the config directory
    /// - Unable to read the config file (other than it not existing)
    /// - The config file contains invalid TOML
    pub fn load() -> Result<Option<Self>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config at {}", config_path.display()))?;

        Ok(Some(config))
    }

    /// Get the path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if unable to determine the config directory
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
            Ok(PathBuf::from(config_home).join("mcpgen").join("config.toml"))
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", "mcpgen") {
            Ok(proj_dirs.config_dir().join("config.toml"))
        } else {
            anyhow::bail!("Could not determine config directory")
        }
    }

    /// Target to use when none is given on the command line
    #[must_use]
    pub fn default_target(config: Option<&Self>) -> ConfigTarget {
        config.and_then(|c| c.default.as_ref()).and_then(|d| d.target).unwrap_or_default()
    }

    /// OS to use when none is given on the command line
    #[must_use]
    pub fn default_os(config: Option<&Self>) -> OperatingSystem {
        config
            .and_then(|c| c.default.as_ref())
            .and_then(|d| d.os)
            .unwrap_or_else(OperatingSystem::current)
    }

    #[must_use]
    pub fn default_catalog(config: Option<&Self>) -> Option<PathBuf> {
        config.and_then(|c| c.default.as_ref()).and_then(|d| d.catalog.clone())
    }
}
