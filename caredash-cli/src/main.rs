// caredash-cli/src/main.rs
mod app;
mod dialog;
mod logging;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io,
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use caredash_core::{
    ConfigFile, DashboardRenderer, FileLayoutStore, LayoutController, NoticeBus, WidgetCategory,
    WidgetRegistry,
};
use caredash_widgets::builtin_registry;

use app::App;

/// Healthcare operations dashboard with a customizable widget layout
#[derive(Parser, Debug)]
#[command(name = "caredash", version, about)]
struct Cli {
    /// Config file (default: ./caredash.toml, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layout file, overriding `[layout] store`
    #[arg(long)]
    store: Option<PathBuf>,

    /// Print the widget catalogue and exit
    #[arg(long)]
    list_widgets: bool,

    /// Replace the saved layout with the configured defaults
    #[arg(long)]
    reset: bool,
}

fn print_catalogue(registry: &WidgetRegistry) {
    for category in WidgetCategory::ALL {
        let descriptors = registry.by_category(category);
        if descriptors.is_empty() {
            continue;
        }

        println!("{}", category.label());
        for d in descriptors {
            println!(
                "  {:<22} {:<7} {}",
                d.kind,
                d.default_size.to_string(),
                d.description
            );
        }
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    while !app.should_quit() {
        terminal.draw(|f| app.draw(f))?;

        // Handle input with timeout
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                CEvent::Key(key) => app.handle_key(key),
                CEvent::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // An explicit --config must exist and parse; the search path may fall back
    let config = match &cli.config {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {}. Using default.", e);
            ConfigFile::default()
        }),
    };

    let registry = Arc::new(builtin_registry()?);

    if cli.list_widgets {
        print_catalogue(&registry);
        return Ok(());
    }

    if let Err(e) = logging::init(&config.logging.level, &config.log_path()) {
        eprintln!("Warning: Failed to open log file: {}. Logging disabled.", e);
    }

    let store_path = cli.store.clone().unwrap_or_else(|| config.store_path());
    tracing::info!(
        "Starting with {} widget types, layout at {}",
        registry.len(),
        store_path.display()
    );

    let notices = NoticeBus::new();
    let feed = notices.subscribe("*");
    let store = Box::new(FileLayoutStore::new(store_path));
    let mut controller = LayoutController::new(registry, store, notices)
        .with_policy(config.layout.add_policy)
        .with_defaults(&config.layout.defaults);

    if cli.reset {
        tracing::info!("Resetting layout to {} defaults", config.layout.defaults.len());
        controller.reset_to(&config.layout.defaults)?;
    }

    let mut app = App::new(controller, DashboardRenderer::new(config.grid()), feed);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Cleanup
    app.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("Dashboard loop failed: {}", e);
    }
    result?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["caredash", "--store", "/tmp/layout.json", "--reset"]);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/layout.json")));
        assert!(cli.reset);
        assert!(!cli.list_widgets);
        assert!(cli.config.is_none());
    }
}
