//! Dashkit CLI — headless access to the component gallery.
//!
//! Commands:
//! - `pages` — list the gallery pages and their slugs
//! - `render` — draw one page to text with the test backend
//! - `slider` — evaluate the percent → value mapping
//! - `grid` — export the sample user grid as CSV
//! - `config` — print the effective configuration

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use dashkit_core::catalog::Page;
use dashkit_core::config::ShowcaseConfig;
use dashkit_core::grid::{sample_users, SortDirection, SortState};
use dashkit_core::slider::SliderBounds;
use dashkit_tui::app::AppState;
use dashkit_tui::ui;

#[derive(Parser)]
#[command(name = "dashkit", about = "Dashkit CLI — admin dashboard component gallery")]
struct Cli {
    /// More log output on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List gallery pages.
    Pages,
    /// Render a page to stdout as plain text.
    Render {
        /// Page slug (see `dashkit pages`).
        page: String,

        #[arg(long, default_value_t = 100)]
        width: u16,

        #[arg(long, default_value_t = 30)]
        height: u16,
    },
    /// Map a track percentage to a slider value.
    Slider {
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        min: f64,

        #[arg(long, default_value_t = 100.0, allow_hyphen_values = true)]
        max: f64,

        #[arg(long, default_value_t = 1.0)]
        step: f64,

        /// Position along the track, 0 to 100. Values outside are clamped.
        #[arg(long, allow_hyphen_values = true)]
        percent: f64,

        /// Print JSON instead of the bare value.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Export the sample user grid as CSV.
    Grid {
        /// Column key to sort by: name, email, role, status, joined, revenue.
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending.
        #[arg(long, default_value_t = false)]
        desc: bool,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML.
    Config {
        /// Config file. Defaults to <config_dir>/dashkit/dashkit.toml when present.
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("DASHKIT_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Pages => {
            print!("{}", list_pages());
            Ok(())
        }
        Commands::Render {
            page,
            width,
            height,
        } => {
            print!("{}", render_page(&page, width, height)?);
            Ok(())
        }
        Commands::Slider {
            min,
            max,
            step,
            percent,
            json,
        } => {
            println!("{}", slider_value(min, max, step, percent, json)?);
            Ok(())
        }
        Commands::Grid { sort, desc, out } => run_grid(sort.as_deref(), desc, out),
        Commands::Config { path } => {
            let config = ShowcaseConfig::load(path.as_deref())?;
            print!("{}", config.to_toml());
            Ok(())
        }
    }
}

fn list_pages() -> String {
    let mut out = format!("{:<14} {:<14} {}\n", "Slug", "Section", "Page");
    out.push_str(&"-".repeat(42));
    out.push('\n');
    for page in Page::ALL {
        out.push_str(&format!("{:<14} {:<14} {}\n", page.slug(), page.section(), page.label()));
    }
    out
}

fn render_page(slug: &str, width: u16, height: u16) -> Result<String> {
    let Some(page) = Page::from_slug(slug) else {
        bail!("unknown page '{slug}' (try `dashkit pages`)");
    };
    if width < 40 || height < 10 {
        bail!("render area must be at least 40x10, got {width}x{height}");
    }
    let mut app = AppState::new(ShowcaseConfig::default(), PathBuf::from("."));
    app.page = page;

    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|f| {
        app.viewport = f.area();
        ui::draw(f, &app);
    })?;
    tracing::info!(page = page.slug(), width, height, "rendered page");
    Ok(buffer_text(terminal.backend().buffer()))
}

/// Buffer symbols row by row, trailing blanks trimmed.
fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.y..area.bottom() {
        let mut line = String::new();
        for x in area.x..area.right() {
            line.push_str(buf[(x, y)].symbol());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn slider_value(min: f64, max: f64, step: f64, percent: f64, json: bool) -> Result<String> {
    let bounds = SliderBounds::new(min, max, step).context("invalid slider bounds")?;
    let value = bounds.percent_to_value(percent);
    let shown = bounds.value_to_percent(value);
    if json {
        let doc = serde_json::json!({
            "min": bounds.min(),
            "max": bounds.max(),
            "step": bounds.step(),
            "percent": percent.clamp(0.0, 100.0),
            "value": value,
            "thumb_percent": shown,
        });
        Ok(serde_json::to_string_pretty(&doc)?)
    } else {
        Ok(format!("{value}"))
    }
}

fn run_grid(sort: Option<&str>, desc: bool, out: Option<PathBuf>) -> Result<()> {
    let mut grid = sample_users();
    if let Some(key) = sort {
        let Some(column) = grid.column_index(key) else {
            let keys: Vec<&str> = grid.columns().iter().map(|c| c.key.as_str()).collect();
            bail!("unknown column '{key}', expected one of: {}", keys.join(", "));
        };
        let direction = if desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        grid.set_sort(Some(SortState { column, direction }));
    } else if desc {
        bail!("--desc needs --sort");
    }

    match out {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            grid.write_csv(file)?;
            eprintln!("Wrote {} rows to {}", grid.row_count(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            grid.write_csv(&mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_list_has_every_slug() {
        let text = list_pages();
        for page in Page::ALL {
            assert!(text.contains(page.slug()));
        }
    }

    #[test]
    fn render_by_slug() {
        let text = render_page("sliders", 100, 30).unwrap();
        assert_eq!(text.lines().count(), 30);
        assert!(text.contains("Volume"));
        assert!(render_page("nope", 100, 30).is_err());
        assert!(render_page("sliders", 10, 5).is_err());
    }

    #[test]
    fn slider_mapping_snaps_and_clamps() {
        assert_eq!(slider_value(0.0, 100.0, 10.0, 34.0, false).unwrap(), "30");
        assert_eq!(slider_value(0.0, 100.0, 1.0, 150.0, false).unwrap(), "100");
        let json = slider_value(-10.0, 40.0, 0.5, 50.0, true).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc["value"], 15.0);
        assert!(slider_value(10.0, 0.0, 1.0, 50.0, false).is_err());
    }

    #[test]
    fn cli_parses_negative_bounds() {
        let cli = Cli::try_parse_from([
            "dashkit", "slider", "--min", "-10", "--max", "40", "--percent", "50",
        ])
        .unwrap();
        match cli.command {
            Commands::Slider { min, max, .. } => assert_eq!((min, max), (-10.0, 40.0)),
            _ => panic!("expected slider"),
        }
    }

    #[test]
    fn grid_rejects_unknown_column() {
        assert!(run_grid(Some("shoe_size"), false, None).is_err());
        assert!(run_grid(None, true, None).is_err());
    }
}
