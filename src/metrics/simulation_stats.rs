//! Aggregate results of headless autoplay runs
//!
//! Per-game figures are kept in a rolling window for smoothed averages; the
//! outcome totals cover every game recorded.

use std::collections::VecDeque;

use crate::game::Status;

/// Summary of one finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub status: Status,
    pub steps: u64,
    pub score: u32,
    /// Ticks where the autoplayer found no safe edge
    pub fallbacks: u64,
}

/// Rolling statistics over simulated games
///
/// # Example
///
/// ```rust
/// use cycle_snake::game::Status;
/// use cycle_snake::metrics::{GameOutcome, SimulationStats};
///
/// let mut stats = SimulationStats::new(50);
/// stats.record_game(GameOutcome { status: Status::Win, steps: 900, score: 33, fallbacks: 0 });
///
/// assert_eq!(stats.wins(), 1);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct SimulationStats {
    steps: VecDeque<u64>,
    scores: VecDeque<u32>,
    total_games: usize,
    total_steps: u64,
    wins: usize,
    losses: usize,
    fallbacks: u64,
    window_size: usize,
}

impl SimulationStats {
    pub fn new(window_size: usize) -> Self {
        Self {
            steps: VecDeque::with_capacity(window_size),
            scores: VecDeque::with_capacity(window_size),
            total_games: 0,
            total_steps: 0,
            wins: 0,
            losses: 0,
            fallbacks: 0,
            window_size,
        }
    }

    /// Record a finished game. A game cut short while still running counts
    /// towards the totals but neither as a win nor as a loss.
    pub fn record_game(&mut self, outcome: GameOutcome) {
        Self::push_window(&mut self.steps, outcome.steps, self.window_size);
        Self::push_window(&mut self.scores, outcome.score, self.window_size);

        self.total_games += 1;
        self.total_steps += outcome.steps;
        self.fallbacks += outcome.fallbacks;
        match outcome.status {
            Status::Win => self.wins += 1,
            Status::Loss => self.losses += 1,
            Status::Continue => {}
        }
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn wins(&self) -> usize {
        self.wins
    }

    pub fn losses(&self) -> usize {
        self.losses
    }

    pub fn fallbacks(&self) -> u64 {
        self.fallbacks
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Fraction of all recorded games that were won
    pub fn win_rate(&self) -> f32 {
        if self.total_games == 0 {
            0.0
        } else {
            self.wins as f32 / self.total_games as f32
        }
    }

    /// Mean game length in ticks over the rolling window
    pub fn mean_steps(&self) -> f32 {
        if self.steps.is_empty() {
            0.0
        } else {
            self.steps.iter().sum::<u64>() as f32 / self.steps.len() as f32
        }
    }

    /// Mean apples eaten over the rolling window
    pub fn mean_score(&self) -> f32 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.scores.iter().sum::<u32>() as f32 / self.scores.len() as f32
        }
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Games: {} | Wins: {} | Losses: {} | Win rate: {:.1}% | Steps: {:.1} | Score: {:.1} | Fallbacks: {}",
            self.total_games,
            self.wins,
            self.losses,
            self.win_rate() * 100.0,
            self.mean_steps(),
            self.mean_score(),
            self.fallbacks,
        )
    }

    fn push_window<T>(window: &mut VecDeque<T>, value: T, window_size: usize) {
        if window.len() >= window_size {
            window.pop_front();
        }
        window.push_back(value);
    }
}
