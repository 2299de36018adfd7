#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use mcpgen::{
    app_config::AppConfig,
    bootstrap,
    catalog::{self, CatalogSource},
    cli::{self, Cli, EnvOverride},
    config::{writer, Config},
    entry::{create_custom_entry, Category, CustomEntryDraft, EnvVarDraft},
    generator::{generate, render, ConfigTarget},
    instructions::setup_steps,
    paths::{resolve_path, OperatingSystem},
    selection::{filter_selections, SelectionStore},
    storage::{self, FileStore},
    validation::validate_selections,
};
use std::path::{Path, PathBuf};
use tracing::{debug, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(cli.debug, cli.trace);

    let app_config = load_and_log_config()?;

    dispatch_command(cli.command, cli.catalog, app_config.as_ref())
}

/// Initialize tracing with the specified debug/trace flags
fn initialize_tracing(debug: bool, trace: bool) {
    let log_level = if trace {
        Level::TRACE
    } else if debug {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::builder().with_default_directive(log_level.into()).from_env_lossy())
        .init();
}

/// Load application configuration and log its status
fn load_and_log_config() -> Result<Option<AppConfig>> {
    let app_config = AppConfig::load().context("Failed to load app configuration")?;

    if app_config.is_some() {
        debug!("Loaded app configuration from: {}", AppConfig::config_path()?.display());
    } else {
        debug!("No app configuration file found at: {}", AppConfig::config_path()?.display());
    }

    Ok(app_config)
}

/// Dispatch to the appropriate command handler
fn dispatch_command(
    command: cli::Commands,
    catalog: Option<PathBuf>,
    app_config: Option<&AppConfig>,
) -> Result<()> {
    match command {
        cli::Commands::Init { force } => run_init(force),
        cli::Commands::List { category, search } => {
            let session = Session::open(catalog, app_config)?;
            run_list(&session, category, &search);
            Ok(())
        },
        cli::Commands::Add { name, description, command, args, env } => {
            let mut session = Session::open(catalog, app_config)?;
            run_add(&mut session, name, description, command, args, env)
        },
        cli::Commands::Remove { id } => {
            let mut session = Session::open(catalog, app_config)?;
            run_remove(&mut session, &id)
        },
        cli::Commands::Generate { target, select, env, output, backup } => {
            let mut session = Session::open(catalog, app_config)?;
            let target = target.unwrap_or_else(|| AppConfig::default_target(app_config));
            let os = AppConfig::default_os(app_config);
            run_generate(&mut session, target, os, &select, &env, output.as_deref(), backup)
        },
        cli::Commands::Path { target, os } => {
            let target = target.unwrap_or_else(|| AppConfig::default_target(app_config));
            let os = os.unwrap_or_else(|| AppConfig::default_os(app_config));
            println!("{}", resolve_path(target, os));
            Ok(())
        },
        cli::Commands::Instructions { target, os } => {
            let target = target.unwrap_or_else(|| AppConfig::default_target(app_config));
            let os = os.unwrap_or_else(|| AppConfig::default_os(app_config));
            run_instructions(target, os);
            Ok(())
        },
    }
}

/// Presets, persisted customs and the selection state built from them
struct Session {
    file_store: FileStore,
    store: SelectionStore,
}

impl Session {
    fn open(catalog: Option<PathBuf>, app_config: Option<&AppConfig>) -> Result<Self> {
        let config = Config::new()?;
        let file_store = config.custom_store();

        let customs = storage::load_custom_entries(&file_store);
        debug!("Loaded {} custom MCP(s)", customs.len());
        let mut store =
            SelectionStore::new(customs).context("Custom MCP list contains duplicate ids")?;

        let explicit = catalog.or_else(|| AppConfig::default_catalog(app_config));
        let source = CatalogSource::resolve(explicit, &config.catalog_path);
        let presets = catalog::load_presets(&source);
        if let Err(e) = store.refresh(presets) {
            warn!("Ignoring preset catalog: {e}");
        }

        Ok(Self { file_store, store })
    }

    fn persist(&mut self) -> Result<()> {
        storage::save_custom_entries(&mut self.file_store, self.store.customs())
            .with_context(|| format!("Failed to save custom MCPs in {}", self.file_store.dir().display()))
    }
}

fn run_init(force: bool) -> Result<()> {
    let config = Config::new()?;

    println!("Bootstrapping mcpgen configuration at: {}", config.config_dir.display());
    bootstrap::bootstrap_config(&config.config_dir, force)?;

    println!("mcpgen configuration bootstrapped successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Review the preset catalog in: {}", config.catalog_path.display());
    println!("  2. Run 'mcpgen list' to see available MCP servers");
    println!("  3. Run 'mcpgen generate --select <ID>' to build your configuration");
    Ok(())
}

fn run_list(session: &Session, category: Option<Category>, search: &str) {
    let selections = session.store.selections();
    let visible = filter_selections(selections, search, category);

    if visible.is_empty() {
        println!("No MCPs found");
        return;
    }

    for selection in &visible {
        let entry = &selection.entry;
        let custom = if entry.is_custom { " (custom)" } else { "" };
        println!("{:<24} {} [{}]{custom}", entry.id, entry.name, entry.category.label());
        println!("{:<24} {}", "", entry.description);

        let required: Vec<&str> = entry.required_env_vars().map(|var| var.name.as_str()).collect();
        if !required.is_empty() {
            println!("{:<24} requires: {}", "", required.join(", "));
        }
        if let Some(url) = &entry.docs_url {
            println!("{:<24} docs: {url}", "");
        }
    }

    println!();
    println!("{} of {} MCP(s) shown", visible.len(), selections.len());
}

fn run_add(
    session: &mut Session,
    name: String,
    description: String,
    command: String,
    args: String,
    env_vars: Vec<EnvVarDraft>,
) -> Result<()> {
    let draft = CustomEntryDraft { name, description, command, args, env_vars };
    let entry = create_custom_entry(&draft)?;
    let id = entry.id.clone();

    session.store.add_custom(entry)?;
    session.persist()?;

    println!("Added custom MCP: {id}");
    Ok(())
}

fn run_remove(session: &mut Session, id: &str) -> Result<()> {
    if session.store.delete_custom(id) {
        session.persist()?;
        println!("Removed custom MCP: {id}");
    } else if session.store.contains(id) {
        println!("'{id}' is a preset MCP and cannot be removed");
    } else {
        println!("No custom MCP with id '{id}'");
    }
    Ok(())
}

fn run_generate(
    session: &mut Session,
    target: ConfigTarget,
    os: OperatingSystem,
    select: &[String],
    overrides: &[EnvOverride],
    output: Option<&Path>,
    backup: bool,
) -> Result<()> {
    for id in select {
        if !session.store.contains(id) {
            anyhow::bail!("Unknown MCP id: {id} (run 'mcpgen list' to see available ids)");
        }
        session.store.set_selected(id, true);
    }

    for EnvOverride { id, key, value } in overrides {
        let Some(selection) = session.store.get(id) else {
            anyhow::bail!("Unknown MCP id in --env: {id}");
        };
        if !selection.selected {
            warn!("'{}' is not selected; the {} override has no effect", id, key);
        }
        session.store.set_env_value(id, key, value);
    }

    for warning in validate_selections(session.store.selections()).warnings {
        warn!("{warning}");
    }

    let document = generate(session.store.selections(), target);
    if document.is_empty() {
        eprintln!("Select MCPs with --select to generate your configuration");
        return Ok(());
    }

    let rendered = render(&document)?;

    let Some(dir) = output else {
        println!("{rendered}");
        return Ok(());
    };

    if backup {
        if let Some(backup_path) = writer::backup_file(dir.join(target.file_name()))? {
            println!("Backup created: {backup_path}");
        }
    }

    let path = writer::write_artifact(dir, target, &rendered)
        .with_context(|| format!("Failed to write {}", target.file_name()))?;
    println!("Wrote {}", path.display());
    println!("{} reads it from: {}", target.app_name(), resolve_path(target, os));
    Ok(())
}

fn run_instructions(target: ConfigTarget, os: OperatingSystem) {
    println!("Setup instructions for {} on {}", target.app_name(), os.label());
    println!();

    for step in setup_steps(target, os, false) {
        println!("{}. {}", step.number, step.title);
        println!("   {}", step.body);
        if let Some(snippet) = step.snippet {
            println!("   {snippet}");
        }
        println!();
    }
}
