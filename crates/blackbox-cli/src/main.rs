//! MCP Blackbox - compose MCP servers into one configuration
//!
//! Usage:
//!   blackbox                  # Launch TUI (default)
//!   blackbox catalog          # List servers in the palette
//!   blackbox add <id>...      # Drop servers into the blackbox
//!   blackbox compose          # Print the combined configuration

mod interactive;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blackbox_core::catalog::Catalog;
use blackbox_core::compose::compose_selection;
use blackbox_core::config::{BlackboxConfig, CatalogSource, ConfigScope, to_toml};
use blackbox_core::context::AppContext;
use blackbox_core::selection::SelectionSet;

use crate::interactive::PalettePicker;

#[derive(Parser)]
#[command(name = "blackbox")]
#[command(about = "Compose MCP servers into a single combined configuration", long_about = None)]
struct Cli {
    /// Catalog source override: builtin, file:<path>, or a registry URL
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List servers available in the palette
    Catalog {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Drop servers into the blackbox
    Add {
        /// Server ids to add, in order
        ids: Vec<String>,
        /// Pick servers from the palette interactively
        #[arg(short, long)]
        interactive: bool,
        /// Skip confirmation prompts
        #[arg(short = 'y', long)]
        yes: bool,
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove servers from the blackbox
    #[command(alias = "rm")]
    Remove {
        /// Server ids to remove
        #[arg(required = true)]
        ids: Vec<String>,
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove every server from the blackbox
    Clear,

    /// Show the current selection
    Selected {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Print or export the combined configuration
    Compose {
        /// Write the document to a file instead of stdout
        #[arg(long, short = 'O')]
        output: Option<PathBuf>,
    },

    /// Create a shareable session link
    Session {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show configuration
    Config {
        /// Show a single scope instead of the merged view
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ScopeArg {
    #[value(alias = "g")]
    Global,
    #[value(alias = "p")]
    Project,
}

impl From<ScopeArg> for ConfigScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Global => ConfigScope::Global,
            ScopeArg::Project => ConfigScope::Project,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
    /// No output on success
    Quiet,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blackbox=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(command) => run_cli(command, cli.catalog.as_deref())?,
        None => run_tui(cli.catalog.as_deref())?,
    }

    Ok(())
}

fn run_cli(command: Commands, catalog: Option<&str>) -> Result<()> {
    let env = CliEnv::load(catalog)?;

    match command {
        Commands::Catalog { format } => run_catalog(&env, format)?,
        Commands::Add {
            ids,
            interactive,
            yes,
            format,
        } => run_add(&env, ids, interactive, yes, format)?,
        Commands::Remove { ids, format } => run_remove(&env, ids, format)?,
        Commands::Clear => {
            env.ctx.selection_manager()?.clear()?;
            println!("✓ Cleared the blackbox");
        }
        Commands::Selected { format } => run_selected(&env, format)?,
        Commands::Compose { output } => run_compose(&env, output)?,
        Commands::Session { format } => run_session(&env, format)?,
        Commands::Config { scope } => run_config(&env, scope)?,
    }
    Ok(())
}

/// Context, merged configuration, and the catalog source in effect.
struct CliEnv {
    ctx: AppContext,
    config: BlackboxConfig,
    source: CatalogSource,
}

impl CliEnv {
    fn load(catalog_override: Option<&str>) -> Result<Self> {
        let ctx = AppContext::with_defaults()?;
        let config = ctx.load_config()?;
        let source = match catalog_override {
            Some(spec) => CatalogSource::parse(spec)?,
            None => config.catalog_source()?,
        };
        Ok(Self {
            ctx,
            config,
            source,
        })
    }

    /// Load the catalog, falling back to an empty one.
    ///
    /// The selection stays usable when the catalog source is unreachable;
    /// unknown ids simply do not resolve.
    fn catalog_or_empty(&self) -> Catalog {
        match self.ctx.load_catalog(&self.source) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("Catalog unavailable ({}): {:#}", self.source, e);
                eprintln!("⚠ Catalog {} is unavailable, continuing without it", self.source);
                Catalog::empty()
            }
        }
    }
}

fn run_catalog(env: &CliEnv, format: OutputFormat) -> Result<()> {
    let catalog = env.ctx.load_catalog(&env.source)?;
    let selection = env.ctx.selection_manager()?.selection().clone();

    match format {
        OutputFormat::Table => print_catalog_table(&catalog, &selection),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(catalog.descriptors())?);
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

fn run_add(
    env: &CliEnv,
    ids: Vec<String>,
    interactive: bool,
    yes: bool,
    format: OutputFormat,
) -> Result<()> {
    let catalog = env.catalog_or_empty();
    let mut manager = env.ctx.selection_manager()?;

    let ids = if interactive {
        let result = PalettePicker::new(&catalog, manager.selection(), yes).pick()?;
        if !result.confirmed {
            println!("Nothing added.");
            return Ok(());
        }
        result.ids
    } else {
        if ids.is_empty() {
            anyhow::bail!("Missing server ids. Pass ids or use --interactive");
        }
        ids
    };

    let mut added = Vec::new();
    let mut skipped = Vec::new();
    for id in ids {
        if manager.add(id.clone())? {
            added.push(id);
        } else {
            skipped.push(id);
        }
    }

    let unresolved: Vec<&str> = added
        .iter()
        .map(String::as_str)
        .filter(|id| !catalog.contains(id))
        .collect();

    match format {
        OutputFormat::Table => {
            for id in &added {
                println!("✓ Added '{}'", id);
            }
            for id in &skipped {
                println!("• '{}' is already in the blackbox", id);
            }
            for id in &unresolved {
                println!("  ⚠ '{}' is not in the catalog and will be left out of the composition", id);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "added": added,
                "alreadySelected": skipped,
                "unresolved": unresolved,
                "selection": manager.selection(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

fn run_remove(env: &CliEnv, ids: Vec<String>, format: OutputFormat) -> Result<()> {
    let mut manager = env.ctx.selection_manager()?;

    let mut removed = Vec::new();
    let mut missing = Vec::new();
    for id in ids {
        if manager.remove(&id)? {
            removed.push(id);
        } else {
            missing.push(id);
        }
    }

    match format {
        OutputFormat::Table => {
            for id in &removed {
                println!("✓ Removed '{}'", id);
            }
            for id in &missing {
                println!("• '{}' was not in the blackbox", id);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "removed": removed,
                "notSelected": missing,
                "selection": manager.selection(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

fn run_selected(env: &CliEnv, format: OutputFormat) -> Result<()> {
    let catalog = env.catalog_or_empty();
    let manager = env.ctx.selection_manager()?;
    let selection = manager.selection();
    warn_unresolved(selection, &catalog);

    match format {
        OutputFormat::Table => print_selection_table(selection, &catalog),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "selection": selection,
                "resolved": selection.resolve(&catalog),
                "unresolved": selection.unresolved(&catalog),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

fn run_compose(env: &CliEnv, output: Option<PathBuf>) -> Result<()> {
    let catalog = env.catalog_or_empty();
    let manager = env.ctx.selection_manager()?;
    warn_unresolved(manager.selection(), &catalog);

    let combined = compose_selection(manager.selection(), &catalog);
    let json = combined.to_json_pretty()?;

    match output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "✓ Wrote combined configuration with {} server(s) to {}",
                combined.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn run_session(env: &CliEnv, format: OutputFormat) -> Result<()> {
    let session = env.ctx.session_factory(&env.config)?.create();

    match format {
        OutputFormat::Table => {
            println!("✓ MCP session created");
            println!("  URL:     {}", session.url);
            println!("  Request: {}", session.request_id);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session)?),
        OutputFormat::Quiet => println!("{}", session.url),
    }
    Ok(())
}

fn run_config(env: &CliEnv, scope: Option<ScopeArg>) -> Result<()> {
    let (label, config) = match scope {
        Some(scope) => {
            let store = env.ctx.config_store(scope.into());
            (store.config_path().display().to_string(), store.load()?)
        }
        None => ("merged (global + project)".to_string(), env.config.clone()),
    };

    println!("# {}", label);
    println!("# catalog in effect: {}", env.source);
    println!("# state: {}", env.ctx.state_dir().display());
    println!();
    print!("{}", to_toml(&config)?);
    Ok(())
}

fn warn_unresolved(selection: &SelectionSet, catalog: &Catalog) {
    for id in selection.unresolved(catalog) {
        tracing::warn!("Selected server '{}' is not in the catalog", id);
    }
}

fn print_catalog_table(catalog: &Catalog, selection: &SelectionSet) {
    if catalog.is_empty() {
        println!("The catalog is empty.");
        return;
    }

    println!("{:<2} {:<32} {:<28} Remote", "", "Id", "Name");
    println!("{}", "-".repeat(90));

    for server in catalog {
        let marker = if selection.contains(&server.id) { "*" } else { "" };
        let remote = server
            .remote_url
            .as_ref()
            .map(|u| u.as_str())
            .unwrap_or("-");
        println!(
            "{:<2} {:<32} {:<28} {}",
            marker, server.id, server.name, remote
        );
    }
}

fn print_selection_table(selection: &SelectionSet, catalog: &Catalog) {
    if selection.is_empty() {
        println!("The blackbox is empty.");
        println!("Add servers with: blackbox add <id> (or blackbox add -i)");
        return;
    }

    for (i, id) in selection.ids().iter().enumerate() {
        match catalog.get(id) {
            Some(server) => println!("{:>3}. {} ({})", i + 1, server.name, id),
            None => println!("{:>3}. {} [not in catalog]", i + 1, id),
        }
    }
}

/// Launch the terminal composer shipped next to this binary.
fn run_tui(catalog: Option<&str>) -> Result<()> {
    let exe = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|dir| dir.join("blackbox-tui")))
        .filter(|p| p.exists())
        .unwrap_or_else(|| PathBuf::from("blackbox-tui"));

    let mut command = std::process::Command::new(&exe);
    if let Some(spec) = catalog {
        command.arg("--catalog").arg(spec);
    }

    let status = command
        .status()
        .with_context(|| format!("Failed to launch {}", exe.display()))?;
    if !status.success() {
        anyhow::bail!("blackbox-tui exited with {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, ScopeArg};
    use blackbox_core::config::ConfigScope;
    use clap::Parser;

    #[test]
    fn parse_add_keeps_id_order() {
        let cli = Cli::try_parse_from(["blackbox", "add", "s2", "s1"]).unwrap();
        match cli.command {
            Some(Commands::Add { ids, .. }) => assert_eq!(ids, vec!["s2", "s1"]),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn parse_remove_requires_ids() {
        assert!(Cli::try_parse_from(["blackbox", "remove"]).is_err());
        assert!(Cli::try_parse_from(["blackbox", "rm", "s1"]).is_ok());
    }

    #[test]
    fn parse_global_catalog_override() {
        let cli =
            Cli::try_parse_from(["blackbox", "compose", "--catalog", "file:servers.json"]).unwrap();
        assert_eq!(cli.catalog.as_deref(), Some("file:servers.json"));
    }

    #[test]
    fn parse_no_command_launches_tui() {
        let cli = Cli::try_parse_from(["blackbox"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_config_scope() {
        let cli = Cli::try_parse_from(["blackbox", "config", "--scope", "p"]).unwrap();
        match cli.command {
            Some(Commands::Config { scope }) => {
                assert_eq!(scope, Some(ScopeArg::Project));
                assert_eq!(ConfigScope::from(ScopeArg::Project), ConfigScope::Project);
            }
            _ => panic!("expected config"),
        }
        assert!(Cli::try_parse_from(["blackbox", "config", "--scope", "shared"]).is_err());
    }

    #[test]
    fn parse_format_short_flag_is_shared() {
        for args in [
            ["blackbox", "add", "-f", "json"],
            ["blackbox", "selected", "-f", "json"],
            ["blackbox", "catalog", "-f", "json"],
        ] {
            assert!(Cli::try_parse_from(args).is_ok());
        }
    }
}
