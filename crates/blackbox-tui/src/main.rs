//! Blackbox TUI - Terminal User Interface
//!
//! Ratatui-based composer: pick servers from the palette and drop them into
//! the blackbox. The selection is saved on every change.

mod app;
mod ui;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blackbox_core::catalog::Catalog;
use blackbox_core::config::CatalogSource;
use blackbox_core::context::AppContext;
use blackbox_core::selection::SelectionStore;

use crate::app::App;

const LOG_FILE_NAME: &str = "blackbox-tui.log";

#[derive(Parser)]
#[command(name = "blackbox-tui")]
#[command(about = "Terminal composer for the MCP blackbox", long_about = None)]
struct Args {
    /// Catalog source override: builtin, file:<path>, or a registry URL
    #[arg(long)]
    catalog: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let ctx = AppContext::with_defaults()?;

    init_tracing(&ctx)?;

    let config = ctx.load_config()?;
    let source = match args.catalog.as_deref() {
        Some(spec) => CatalogSource::parse(spec)?,
        None => config.catalog_source()?,
    };
    let catalog = ctx.load_catalog(&source).unwrap_or_else(|e| {
        tracing::warn!("Catalog {} unavailable, using an empty palette: {:#}", source, e);
        Catalog::empty()
    });
    let manager = ctx.selection_manager()?;
    for id in manager.selection().unresolved(&catalog) {
        tracing::warn!("Selected server '{}' is not in the catalog", id);
    }

    let mut app = App::new(catalog, manager);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the TUI
    let res = run_tui(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

/// Log to a file in the state directory; stdout belongs to the alternate screen.
fn init_tracing(ctx: &AppContext) -> anyhow::Result<()> {
    std::fs::create_dir_all(ctx.state_dir()).with_context(|| {
        format!("Failed to create state directory: {}", ctx.state_dir().display())
    })?;
    let log_path = ctx.state_dir().join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blackbox_tui=debug,blackbox_core=debug,info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn run_tui<S: SelectionStore>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App<S>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
            if app.should_quit() {
                return Ok(());
            }
        }
    }
}
