use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::catalog::DEFAULT_CATALOG;

/// Example config.toml template
const EXAMPLE_CONFIG: &str = r#"# mcpgen Configuration File

# [default]
# Defaults that can be overridden by command-line arguments
# target = "standalone"  # Options: "standalone" (Cursor), "editor-settings" (VS Code)
# os = "linux"  # Options: "macos", "windows", "linux"
# catalog = "/path/to/catalog.json"  # Preset catalog (defaults to catalog.json next to this file)
"#;

/// Create a file with content if it doesn't exist or force is true
fn create_file_if_needed(path: &Path, content: &str, force: bool, description: &str) -> Result<()> {
    if force || !path.exists() {
        fs::write(path, content)
            .with_context(|| format!("Failed to create {}: {}", description, path.display()))?;
        info!("Created {}", description);
    } else {
        info!("{} already exists, skipping", description);
    }
    Ok(())
}

/// Bootstrap the mcpgen configuration directory
///
/// Writes the preset catalog and an example `config.toml`. Custom entries are
/// never touched, even with `force`.
///
/// # Errors
///
/// Returns an error if:
/// - Unable to create the configuration directory
/// - Unable to write any of the default files
pub fn bootstrap_config(config_dir: &Path, force: bool) -> Result<()> {
    fs::create_dir_all(config_dir)
        .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;

    create_file_if_needed(&config_dir.join("catalog.json"), DEFAULT_CATALOG, force, "catalog.json")?;
    create_file_if_needed(&config_dir.join("config.toml"), EXAMPLE_CONFIG, force, "config.toml")?;

    info!("Bootstrap complete at: {}", config_dir.display());
    Ok(())
}
