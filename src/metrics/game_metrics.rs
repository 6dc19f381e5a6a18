use std::time::{Duration, Instant};

use crate::game::Status;

/// Session counters shown in the TUI header
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub wins: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            wins: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Record a finished game; non-terminal statuses are ignored
    pub fn on_game_over(&mut self, final_score: u32, status: Status) {
        if !status.is_terminal() {
            return;
        }
        self.games_played += 1;
        if status == Status::Win {
            self.wins += 1;
        }
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_outcomes_tracked() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(12, Status::Loss);
        metrics.on_game_over(33, Status::Win);
        metrics.on_game_over(4, Status::Loss);

        assert_eq!(metrics.games_played, 3);
        assert_eq!(metrics.wins, 1);
        assert_eq!(metrics.high_score, 33);
    }

    #[test]
    fn test_running_game_not_counted() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(7, Status::Continue);
        assert_eq!(metrics.games_played, 0);
        assert_eq!(metrics.high_score, 0);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
