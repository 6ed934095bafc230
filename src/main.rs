use anyhow::{Context, Result, anyhow};
use clap::Parser;
use snake_evolution::game::GameConfig;
use snake_evolution::modes::PlayMode;
use snake_evolution::session::JsonFileStore;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_evolution")]
#[command(version, about = "Collect ten apples to complete your evolution")]
struct Cli {
    /// JSON file overriding the default game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Where the high score is kept
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    config
        .validate()
        .map_err(|msg| anyhow!("Invalid game configuration: {msg}"))?;

    info!(
        grid_size = config.grid_size,
        tick_ms = config.tick_interval_ms,
        high_score_file = ?cli.high_score_file,
        "starting snake evolution"
    );

    let store = JsonFileStore::new(cli.high_score_file);
    let mut play_mode = PlayMode::new(config, store);
    play_mode.run().await?;

    info!(high_score = play_mode.high_score(), "exiting");
    Ok(())
}

// The terminal belongs to the game screen, so logs only ever go to a file.
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("Failed to install tracing subscriber: {err}"))?;

    Ok(())
}
