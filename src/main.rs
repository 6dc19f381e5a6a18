use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cycle_snake::game::GameConfig;
use cycle_snake::modes::{HumanMode, SimulateConfig, SimulateMode, WatchMode};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cycle_snake")]
#[command(version, about = "Snake game that can clear the board on its own")]
struct Cli {
    #[arg(long, value_enum, default_value = "human")]
    mode: Mode,

    /// Board side length (autoplay needs an even size)
    #[arg(long)]
    size: Option<usize>,

    /// Body segments behind the head at the start
    #[arg(long)]
    body_length: Option<usize>,

    /// Seed for apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games in simulate mode
    #[arg(long, default_value = "100")]
    games: usize,

    /// TOML file with board settings; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Watch the autoplayer in the terminal
    Watch,
    /// Run headless autoplay games and print statistics
    Simulate,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(length) = self.body_length {
            config.initial_body_length = length;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.game_config()?;
    info!("starting with {:?}", config);

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Watch => {
            let mut watch_mode = WatchMode::new(config)?;
            watch_mode.run().await?;
        }
        Mode::Simulate => {
            let mut simulate_mode = SimulateMode::new(SimulateConfig::new(cli.games, config))?;
            simulate_mode.run()?;
        }
    }

    Ok(())
}
