//! Wellblocks: falling-block well game and L-system plant viewer in the terminal.

mod app;
mod input;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use wellblocks::GameConfig;
use wellblocks::lsystem::{self, LSystem, Preset};

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = args.log_file.as_deref() {
        init_logging(path)?;
    }
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette).unwrap_or_default();
    let config = GameConfig {
        width: args.width,
        height: args.height,
        frame_sample: args.frame_sample,
        seed: args.seed,
    };
    config.validate()?;
    let plant = args.plant.map(|preset| plant_from_args(preset, &args)).transpose()?;
    let mut app = App::new(&args, &config, theme, plant);
    app.run()?;
    Ok(())
}

/// Logs go to a file; stdout belongs to the terminal UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(())
}

fn plant_from_args(preset: Preset, args: &Args) -> Result<LSystem> {
    let mut plant = LSystem::preset(preset);
    if let Some(iterations) = args.iterations {
        plant.iterations = iterations;
    }
    for rule in &args.rule {
        let (symbol, replacement) = lsystem::parse_rule(rule)?;
        plant.rules.insert(symbol, replacement);
    }
    Ok(plant)
}

/// Falling-block well game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "wellblocks",
    version,
    about = "Falling-block well game in the terminal. Fill a row edge to edge to clear it.",
    long_about = "Wellblocks is a small falling-block game. Pieces fall one row every few frames; \
        a full row between the walls is removed and everything above it drops by one.\n\n\
        CONTROLS:\n  Left/Right  Move    Up        Rotate      Down       Move down\n  \
        S           Start / restart      P          Pause       Q / Esc    Quit\n\n\
        Use --plant bush|weed to open the L-system plant viewer instead."
)]
pub struct Args {
    /// Well width in columns, walls excluded (7 to 1000). Pieces spawn near the centre.
    #[arg(long, default_value = "10", value_name = "COLS")]
    pub width: u16,

    /// Well height in rows, floor excluded (4 to 1000).
    #[arg(long, default_value = "20", value_name = "ROWS")]
    pub height: u16,

    /// The piece falls once every N frames (smaller is faster).
    #[arg(long, default_value = "12", value_name = "N")]
    pub frame_sample: u64,

    /// Frames drawn per second.
    #[arg(long, default_value = "60.0", value_name = "RATE")]
    pub frame_rate: f64,

    /// Seed for piece selection (reproducible games).
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Path to theme file (btop-style theme[key]=\"value\"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Disable the row-clear flash.
    #[arg(long)]
    pub no_animation: bool,

    /// Show an L-system plant (bush or weed) instead of the game.
    #[arg(long, value_name = "PRESET")]
    pub plant: Option<Preset>,

    /// Override the plant's rewrite iterations.
    #[arg(long, value_name = "N")]
    pub iterations: Option<u32>,

    /// Add or replace a plant rule, e.g. --rule 'X=F[+X]F'. Repeatable.
    #[arg(long, value_name = "RULE")]
    pub rule: Vec<String>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}
