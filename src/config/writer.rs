use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::generator::ConfigTarget;

/// Write a rendered configuration as the download artifact for `target`.
///
/// The file is named after the target (`mcp.json` or
/// `settings-mcp-snippet.json`) and ends with a newline.
///
/// # Errors
///
/// Returns an error if:
/// - Unable to create the output directory
/// - Unable to write to the file
pub fn write_artifact<P: AsRef<Path>>(
    dir: P,
    target: ConfigTarget,
    content: &str,
) -> anyhow::Result<PathBuf> {
    let dir_ref = dir.as_ref();
    fs::create_dir_all(dir_ref)?;

    let path = dir_ref.join(target.file_name());
    fs::write(&path, format!("{content}\n"))?;

    Ok(path)
}

/// Create a backup of a file with timestamp
///
/// # Errors
///
/// Returns an error if unable to copy the file
pub fn backup_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Option<String>> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Ok(None);
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup_path = path_ref.with_file_name(format!(
        "{}.backup.{}",
        path_ref.file_name().and_then(|n| n.to_str()).unwrap_or("mcp.json"),
        timestamp
    ));

    fs::copy(path_ref, &backup_path)?;

    Ok(Some(backup_path.to_string_lossy().to_string()))
}
