//! Dashkit TUI — component gallery with vim-style keys and mouse support.
//!
//! Pages follow the sidebar: overview, breadcrumbs, stat cards, modals,
//! drawers, sliders, tree view, data grid, select, file upload, heatmap.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use dashkit_core::config::ShowcaseConfig;
use dashkit_tui::app::{AppState, ErrorCategory};
use dashkit_tui::{input, persistence, ui};

#[derive(Parser)]
#[command(name = "dashkit-tui", about = "Dashkit component gallery")]
struct Args {
    /// TOML config file. Defaults to <config_dir>/dashkit/dashkit.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Log to a file; the terminal belongs to the UI.
fn init_tracing(data_dir: &std::path::Path) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(data_dir.join("dashkit.log")) else {
        return;
    };
    let filter = EnvFilter::try_from_env("DASHKIT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dashkit");
    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dashkit")
        .join("state.json");
    init_tracing(&data_dir);

    let (config, config_error) = match ShowcaseConfig::load(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (ShowcaseConfig::default(), Some(err)),
    };
    let tick_rate = Duration::from_millis(config.tick_rate_ms);

    let mut app = AppState::new(config, data_dir.join("exports"));
    if let Some(err) = config_error {
        let context = args
            .config
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "default config".into());
        app.push_error(ErrorCategory::Config, err.to_string(), context);
    }

    // Apply persisted state
    let persisted = persistence::load(&state_path);
    persistence::apply(&mut app, persisted);
    tracing::info!(page = app.page.slug(), "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app, tick_rate);

    // Save state before exit
    app.sliders.teardown_all();
    let persisted = persistence::extract(&app);
    if let Err(err) = persistence::save(&state_path, &persisted) {
        tracing::warn!(%err, "could not save state");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        // 1. Render
        terminal.draw(|f| {
            app.viewport = f.area();
            ui::draw(f, app);
        })?;

        // 2. Poll for input until the next tick is due
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Resize(width, height) => {
                    app.viewport = ratatui::layout::Rect::new(0, 0, width, height);
                }
                _ => {}
            }
        }

        // 3. Advance simulations
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_rate {
            app.tick(elapsed);
            last_tick = Instant::now();
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
