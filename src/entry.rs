//! MCP server entries: the launchable definitions shown in the catalog and the
//! custom entries a user adds on top of it.

use chrono::Utc;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::{McpgenError, Result};

const CUSTOM_ID_PREFIX: &str = "custom-";
const DEFAULT_CUSTOM_DESCRIPTION: &str = "Custom MCP server";

/// Last suffix handed out by [`unique_suffix`], shared by the whole process.
static LAST_SUFFIX: AtomicI64 = AtomicI64::new(0);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Core,
    Data,
    Dev,
    Ai,
    Custom,
}

impl Category {
    /// Human readable label used when listing entries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Core => "Core",
            Self::Data => "Data",
            Self::Dev => "Dev Tools",
            Self::Ai => "AI",
            Self::Custom => "Custom",
        }
    }
}

/// A declared environment variable requirement of an entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvVarSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// A launchable MCP server definition.
///
/// `env` is the authoritative source of base values; `env_vars` only describes
/// which of those keys deserve a prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env_vars: Vec<EnvVarSpec>,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
}

impl Entry {
    /// Declared variables that must carry a value in the generated config.
    pub fn required_env_vars(&self) -> impl Iterator<Item = &EnvVarSpec> {
        self.env_vars.iter().filter(|var| var.required)
    }
}

/// A declared variable for a custom entry before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVarDraft {
    pub name: String,
    pub required: bool,
}

/// Raw user input for a custom entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomEntryDraft {
    pub name: String,
    pub description: String,
    pub command: String,
    /// Whitespace separated argument list, as typed by the user.
    pub args: String,
    pub env_vars: Vec<EnvVarDraft>,
}

/// Build a custom entry from user input.
///
/// # Errors
///
/// Returns [`McpgenError::Validation`] when the name or the command is blank.
pub fn create_custom_entry(draft: &CustomEntryDraft) -> Result<Entry> {
    let name = draft.name.trim();
    let command = draft.command.trim();

    if name.is_empty() {
        return Err(McpgenError::Validation("MCP name must not be empty".to_string()));
    }
    if command.is_empty() {
        return Err(McpgenError::Validation("MCP command must not be empty".to_string()));
    }

    let id = format!("{CUSTOM_ID_PREFIX}{}-{}", slugify(name)?, unique_suffix());

    let env_vars: Vec<EnvVarSpec> = draft
        .env_vars
        .iter()
        .filter(|var| !var.name.trim().is_empty())
        .map(|var| EnvVarSpec {
            name: normalize_env_var_name(&var.name),
            description: String::new(),
            required: var.required,
            default: None,
        })
        .collect();

    let env = env_vars.iter().map(|var| (var.name.clone(), String::new())).collect();

    let description = draft.description.trim();
    let description =
        if description.is_empty() { DEFAULT_CUSTOM_DESCRIPTION } else { description };

    Ok(Entry {
        id,
        name: name.to_string(),
        description: description.to_string(),
        command: command.to_string(),
        args: split_args(&draft.args),
        env,
        env_vars,
        category: Category::Custom,
        docs_url: None,
        is_custom: true,
    })
}

/// Lowercase `name`, turn whitespace runs into `-` and strip anything outside
/// `[a-z0-9-]`.
///
/// # Errors
///
/// Returns an error if the normalization patterns fail to compile.
pub fn slugify(name: &str) -> Result<String> {
    let whitespace = Regex::new(r"\s+")?;
    let disallowed = Regex::new(r"[^a-z0-9-]")?;

    let lowered = name.to_lowercase();
    let hyphenated = whitespace.replace_all(&lowered, "-");
    Ok(disallowed.replace_all(&hyphenated, "").into_owned())
}

/// Upper snake case: `" api key "` becomes `"API_KEY"`.
#[must_use]
pub fn normalize_env_var_name(name: &str) -> String {
    name.split_whitespace().map(str::to_uppercase).collect::<Vec<_>>().join("_")
}

/// Split an argument string on whitespace runs.
#[must_use]
pub fn split_args(args: &str) -> Vec<String> {
    args.split_whitespace().map(str::to_string).collect()
}

/// Millisecond timestamp, bumped past the previous value when the clock has
/// not moved so that every call in this process returns a distinct suffix.
fn unique_suffix() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_SUFFIX.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_SUFFIX.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}
