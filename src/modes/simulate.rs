//! Headless autoplay over many games
//!
//! Each game gets its own engine; the autoplayer is built once and shared.
//! With a base seed, game `i` is seeded with `seed + i` so a whole run can be
//! replayed.
//!
//! # Example
//!
//! ```rust,no_run
//! use cycle_snake::game::GameConfig;
//! use cycle_snake::modes::{SimulateConfig, SimulateMode};
//!
//! let config = SimulateConfig::new(100, GameConfig::small().with_seed(7));
//! let mut mode = SimulateMode::new(config)?;
//! let stats = mode.run()?;
//! println!("{}", stats.format_summary());
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::autoplay::AutoPlayer;
use crate::game::{GameConfig, GameEngine, Status};
use crate::metrics::{GameOutcome, SimulationStats};

#[derive(Debug, Clone)]
pub struct SimulateConfig {
    pub num_games: usize,

    /// Print a progress line every N games
    pub log_frequency: usize,

    /// A game still running after this many ticks is abandoned
    pub max_steps: u64,

    pub game_config: GameConfig,
}

impl SimulateConfig {
    pub fn new(num_games: usize, game_config: GameConfig) -> Self {
        let cells = (game_config.board_size * game_config.board_size) as u64;
        Self {
            num_games,
            log_frequency: 100,
            // Every apple is reachable within one lap of the cycle
            max_steps: cells.saturating_mul(cells).max(1),
            game_config,
        }
    }
}

pub struct SimulateMode {
    player: AutoPlayer,
    stats: SimulationStats,
    config: SimulateConfig,
}

impl SimulateMode {
    pub fn new(config: SimulateConfig) -> Result<Self> {
        config
            .game_config
            .validate()
            .context("Invalid game configuration")?;
        let player = AutoPlayer::new(config.game_config.board_size)
            .context("Autoplay needs an even board size")?;

        Ok(Self {
            player,
            stats: SimulationStats::new(100),
            config,
        })
    }

    pub fn run(&mut self) -> Result<SimulationStats> {
        self.print_header();

        for game in 0..self.config.num_games {
            let outcome = self.play_game(game)?;
            debug!("game {} finished: {:?}", game + 1, outcome);
            self.stats.record_game(outcome);

            if (game + 1) % self.config.log_frequency.max(1) == 0 {
                self.print_progress(game + 1);
            }
        }

        info!("simulation complete: {}", self.stats.format_summary());
        println!("\nSimulation complete!");
        println!("\nFinal Statistics:");
        println!("{}", self.stats.format_summary());

        Ok(self.stats.clone())
    }

    /// Play one game to the end, or until the step cap
    pub fn play_game(&self, game: usize) -> Result<GameOutcome> {
        let mut game_config = self.config.game_config.clone();
        if let Some(seed) = game_config.seed {
            game_config.seed = Some(seed.wrapping_add(game as u64));
        }
        let mut engine = GameEngine::new(game_config)
            .with_context(|| format!("Failed to create game {}", game + 1))?;

        let mut fallbacks = 0;
        let mut status = Status::Continue;
        while status == Status::Continue && u64::from(engine.steps()) < self.config.max_steps {
            let turn = self
                .player
                .play_turn(&mut engine)
                .with_context(|| format!("Autoplayer could not move in game {}", game + 1))?;
            if turn.decision.is_fallback() {
                fallbacks += 1;
            }
            status = turn.status;
        }

        if status == Status::Continue {
            warn!(
                "game {} abandoned after {} steps with score {}",
                game + 1,
                engine.steps(),
                engine.score()
            );
        }

        Ok(GameOutcome {
            status,
            steps: u64::from(engine.steps()),
            score: engine.score(),
            fallbacks,
        })
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    fn print_header(&self) {
        let rule = "=".repeat(70);
        let game = &self.config.game_config;
        println!("{}", rule);
        println!("Autoplay Simulation - Cycle Snake");
        println!("{}", rule);
        println!("Games: {}", self.config.num_games);
        println!(
            "Board: {}x{}, starting body {}",
            game.board_size, game.board_size, game.initial_body_length
        );
        match game.seed {
            Some(seed) => println!("Seed: {} (+ game index)", seed),
            None => println!("Seed: from entropy"),
        }
        println!("Step cap: {} per game", self.config.max_steps);
        println!("{}", rule);
        println!();
    }

    fn print_progress(&self, game: usize) {
        println!(
            "[Game {}/{}] {}",
            game,
            self.config.num_games,
            self.stats.format_summary()
        );
    }
}
