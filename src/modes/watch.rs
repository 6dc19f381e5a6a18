//! Watch the autoplayer clear the board
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Restart the game
//! - 1-4: Speed (slow, normal, fast, turbo)
//! - Q/Esc: Quit
//!
//! A finished game is shown for a moment and then restarted.

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use log::info;
use std::time::Duration;
use tokio::time::{Interval, interval};

use super::terminal::{FRAME_INTERVAL_MS, Tui, restore_terminal, setup_terminal};
use crate::autoplay::{AutoPlayer, Decision};
use crate::game::{GameConfig, GameEngine, Status};
use crate::input::{InputHandler, KeyAction, PlaybackSpeed};
use crate::metrics::GameMetrics;
use crate::render::{AutoplayHud, Hud, Renderer};

const CONTROLS: &[(&str, &str)] = &[
    ("1-4", "speed"),
    ("Space", "pause"),
    ("R", "restart"),
    ("Q", "quit"),
];

/// Ticks a finished board stays on screen before the next game starts
const FINISHED_HOLD_TICKS: u32 = 8;

pub struct WatchMode {
    engine: GameEngine,
    player: AutoPlayer,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    paused: bool,
    speed: PlaybackSpeed,
    last_decision: Option<Decision>,
    fallbacks: u64,
    /// Ticks spent showing a finished game
    finished_for: u32,
}

impl WatchMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let player = AutoPlayer::new(config.board_size)
            .context("Autoplay needs an even board size")?;
        let engine = GameEngine::new(config).context("Failed to create game")?;

        Ok(Self {
            engine,
            player,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            paused: false,
            speed: PlaybackSpeed::Normal,
            last_decision: None,
            fallbacks: 0,
            finished_for: 0,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.run_watch_loop(&mut terminal).await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn run_watch_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.speed.tick_interval());
        let mut render_timer = interval(Duration::from_millis(FRAME_INTERVAL_MS));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.advance()?;
                    }
                }

                _ = render_timer.tick() => {
                    if self.engine.is_running() {
                        self.metrics.update();
                    }
                    let hud = Hud {
                        title: "Autoplay",
                        paused: self.paused,
                        autoplay: Some(AutoplayHud {
                            speed: self.speed.as_str(),
                            last_decision: self.last_decision,
                            fallbacks: self.fallbacks,
                        }),
                        controls: CONTROLS,
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine, &self.metrics, &hud);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// One timer tick: let the autoplayer move, or count down to a restart
    fn advance(&mut self) -> Result<()> {
        if self.engine.status().is_terminal() {
            self.finished_for += 1;
            if self.finished_for >= FINISHED_HOLD_TICKS {
                self.restart();
            }
            return Ok(());
        }

        let turn = self
            .player
            .play_turn(&mut self.engine)
            .context("Autoplayer could not move")?;
        self.last_decision = Some(turn.decision);
        if turn.decision.is_fallback() {
            self.fallbacks += 1;
        }

        if turn.status.is_terminal() {
            info!(
                "autoplay finished: {:?} with score {} after {} steps",
                turn.status,
                self.engine.score(),
                self.engine.steps()
            );
            self.metrics.on_game_over(self.engine.score(), turn.status);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Speed(speed) => self.change_speed(speed, tick_timer),
            KeyAction::Pause => self.paused = !self.paused,
            KeyAction::Restart => self.restart(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Steer(_) | KeyAction::None => {}
        }
    }

    fn change_speed(&mut self, speed: PlaybackSpeed, tick_timer: &mut Interval) {
        self.speed = speed;
        tick_timer.reset_after(speed.tick_interval());
    }

    fn restart(&mut self) {
        // A game abandoned mid-run is not counted
        self.engine.reset();
        self.metrics.on_game_start();
        self.last_decision = None;
        self.finished_for = 0;
    }

    pub fn status(&self) -> Status {
        self.engine.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_board_rejected() {
        let mut config = GameConfig::small();
        config.board_size = 7;
        assert!(WatchMode::new(config).is_err());
    }

    #[test]
    fn test_plays_to_a_win_then_restarts() {
        let mut mode = WatchMode::new(GameConfig::small().with_seed(3)).unwrap();

        let mut ticks = 0;
        while mode.status() == Status::Continue {
            mode.advance().unwrap();
            ticks += 1;
            assert!(ticks < 100_000, "autoplay did not finish");
        }
        assert_eq!(mode.status(), Status::Win);
        assert_eq!(mode.metrics.wins, 1);
        assert_eq!(mode.fallbacks, 0);

        for _ in 0..FINISHED_HOLD_TICKS {
            mode.advance().unwrap();
        }
        assert_eq!(mode.status(), Status::Continue);
        assert_eq!(mode.engine.steps(), 0);
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_last_decision_tracked() {
        let mut mode = WatchMode::new(GameConfig::small().with_seed(8)).unwrap();
        assert!(mode.last_decision.is_none());
        mode.advance().unwrap();
        assert!(matches!(mode.last_decision, Some(Decision::Planned(_))));
        mode.restart();
        assert!(mode.last_decision.is_none());
    }
}
