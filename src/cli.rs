use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::entry::{Category, EnvVarDraft};
use crate::generator::ConfigTarget;
use crate::paths::OperatingSystem;

#[derive(Parser, Debug)]
#[command(
    name = "mcpgen",
    about = "MCP config generator - Build Cursor and VS Code MCP server configurations",
    long_about = "mcpgen builds MCP (Model Context Protocol) server configurations.

It helps you:
  • Pick MCP servers from a preset catalog
  • Add your own custom MCP servers
  • Fill in environment variables such as API keys
  • Produce mcp.json for Cursor or a settings.json snippet for VS Code

Configuration files are stored in:
  • $XDG_CONFIG_HOME/mcpgen/ (or ~/.config/mcpgen/)
    - catalog.json: preset MCP servers (built-in list when absent)
    - custom-mcps.json: your custom MCP servers
    - config.toml: defaults for target, OS and catalog",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug output (shows INFO and DEBUG messages)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable trace output (shows all log messages including TRACE)
    #[arg(short = 't', long, global = true)]
    pub trace: bool,

    /// Preset catalog file (overrides config.toml and the default catalog)
    #[arg(long, global = true, env = "MCPGEN_CATALOG", value_hint = clap::ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bootstrap the mcpgen configuration directory with default files
    #[command(long_about = "Bootstrap the mcpgen configuration directory with default files.

This command creates the following files in $XDG_CONFIG_HOME/mcpgen/:
  • catalog.json - preset MCP server catalog
  • config.toml - defaults for target, OS and catalog

By default, existing files are preserved. Use --force to reinitialize.
Custom MCP servers are never removed.")]
    Init {
        /// Force reinitialization (overwrites catalog.json and config.toml)
        #[arg(short, long)]
        force: bool,
    },

    /// List available MCP servers
    List {
        /// Only show servers of this category
        #[arg(short, long, value_enum)]
        category: Option<Category>,

        /// Only show servers whose name or description contains this text
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Add a custom MCP server
    #[command(long_about = "Add a custom MCP server.

Examples:
  # A server started with npx
  mcpgen add --name \"My Server\" --command npx --args \"-y @my/server\"

  # Declare environment variables (required unless suffixed with :optional)
  mcpgen add --name weather --command uvx --args weather-mcp --env \"api key\" --env REGION:optional")]
    Add {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// What the server does
        #[arg(short, long, default_value = "")]
        description: String,

        /// Executable to launch
        #[arg(short, long)]
        command: String,

        /// Space-separated list of arguments
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        args: String,

        /// Environment variable to declare, NAME or NAME:optional
        #[arg(short, long = "env", value_name = "NAME[:optional]", value_parser = parse_env_declaration)]
        env: Vec<EnvVarDraft>,
    },

    /// Remove a custom MCP server
    Remove {
        /// Id of the custom server
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Generate the MCP configuration for the selected servers
    #[command(long_about = "Generate the MCP configuration for the selected servers.

Without --output the configuration is printed to stdout. With --output it is
written to mcp.json (standalone target) or settings-mcp-snippet.json
(editor-settings target) inside the given directory.

Examples:
  # Cursor configuration with two servers
  mcpgen generate --select filesystem --select github \\
    --env github:GITHUB_PERSONAL_ACCESS_TOKEN=ghp_xxx

  # VS Code settings snippet written to the current directory
  mcpgen generate --target vscode --select memory --output .")]
    Generate {
        /// Output target (defaults to config.toml or standalone)
        #[arg(short = 'T', long, value_enum)]
        target: Option<ConfigTarget>,

        /// Id of a server to include (repeatable)
        #[arg(short, long, value_name = "ID")]
        select: Vec<String>,

        /// Environment override for a selected server (repeatable)
        #[arg(short, long = "env", value_name = "ID:KEY=VALUE", value_parser = parse_env_override)]
        env: Vec<EnvOverride>,

        /// Directory to write the configuration file into
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,

        /// Create timestamped backup of an existing output file first
        #[arg(short, long, requires = "output")]
        backup: bool,
    },

    /// Show where the configuration file lives
    Path {
        /// Output target (defaults to config.toml or standalone)
        #[arg(short = 'T', long, value_enum)]
        target: Option<ConfigTarget>,

        /// Operating system (defaults to config.toml or the current OS)
        #[arg(short, long, value_enum)]
        os: Option<OperatingSystem>,
    },

    /// Show setup instructions for a target and operating system
    Instructions {
        /// Output target (defaults to config.toml or standalone)
        #[arg(short = 'T', long, value_enum)]
        target: Option<ConfigTarget>,

        /// Operating system (defaults to config.toml or the current OS)
        #[arg(short, long, value_enum)]
        os: Option<OperatingSystem>,
    },
}

/// `--env ID:KEY=VALUE` on the generate command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOverride {
    pub id: String,
    pub key: String,
    pub value: String,
}

/// Parse `NAME` or `NAME:optional` / `NAME:required`.
///
/// # Errors
///
/// Returns an error for an empty name or an unknown qualifier.
pub fn parse_env_declaration(input: &str) -> Result<EnvVarDraft, String> {
    let (name, required) = match input.rsplit_once(':') {
        Some((name, "optional")) => (name, false),
        Some((name, "required")) => (name, true),
        Some((_, other)) => return Err(format!("unknown qualifier '{other}', use :optional or :required")),
        None => (input, true),
    };

    if name.trim().is_empty() {
        return Err("environment variable name must not be empty".to_string());
    }

    Ok(EnvVarDraft { name: name.to_string(), required })
}

/// Parse `ID:KEY=VALUE`. The value may be empty.
///
/// # Errors
///
/// Returns an error if the id or key is missing.
pub fn parse_env_override(input: &str) -> Result<EnvOverride, String> {
    let (id, assignment) =
        input.split_once(':').ok_or_else(|| format!("expected ID:KEY=VALUE, got '{input}'"))?;
    let (key, value) = assignment
        .split_once('=')
        .ok_or_else(|| format!("expected ID:KEY=VALUE, got '{input}'"))?;

    if id.is_empty() || key.is_empty() {
        return Err(format!("expected ID:KEY=VALUE, got '{input}'"));
    }

    Ok(EnvOverride { id: id.to_string(), key: key.to_string(), value: value.to_string() })
}
