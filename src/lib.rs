#![allow(missing_docs)]

pub mod app_config;
pub mod bootstrap;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod entry;
pub mod generator;
pub mod instructions;
pub mod paths;
pub mod selection;
pub mod storage;
pub mod validation;

pub use entry::{create_custom_entry, Category, CustomEntryDraft, Entry, EnvVarSpec};
pub use generator::{generate, render, ConfigDocument, ConfigTarget};
pub use paths::{resolve_path, OperatingSystem};
pub use selection::{reconcile, Selection, SelectionStore};

#[derive(Debug, thiserror::Error)]
pub enum McpgenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate MCP id: {0}")]
    DuplicateId(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, McpgenError>;
