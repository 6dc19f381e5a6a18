use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use log::info;
use std::time::Duration;
use tokio::time::interval;

use super::terminal::{FRAME_INTERVAL_MS, Tui, restore_terminal, setup_terminal};
use crate::game::{Direction, GameConfig, GameEngine, Status};
use crate::input::{InputHandler, KeyAction, Steering};
use crate::metrics::GameMetrics;
use crate::render::{Hud, Renderer};

const CONTROLS: &[(&str, &str)] = &[
    ("↑↓←→/WASD", "move"),
    ("Space", "pause"),
    ("R", "restart"),
    ("Q", "quit"),
];

pub struct HumanMode {
    engine: GameEngine,
    steering: Steering,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    paused: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let engine = GameEngine::new(config).context("Failed to create game")?;

        Ok(Self {
            engine,
            steering: Steering::default(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            paused: false,
            pending_direction: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.run_game_loop(&mut terminal).await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks at 8 Hz
        let mut tick_timer = interval(Duration::from_millis(125));
        let mut render_timer = interval(Duration::from_millis(FRAME_INTERVAL_MS));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    if self.engine.is_running() && !self.paused {
                        self.update_game();
                    }
                }

                _ = render_timer.tick() => {
                    if self.engine.is_running() {
                        self.metrics.update();
                    }
                    let hud = Hud {
                        title: "Snake",
                        paused: self.paused,
                        autoplay: None,
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

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => self.pending_direction = Some(direction),
            KeyAction::Pause => self.paused = !self.paused,
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Speed(_) | KeyAction::None => {}
        }
    }

    /// Advance one tick in the current heading
    fn update_game(&mut self) -> Status {
        if let Some(direction) = self.pending_direction.take() {
            self.steering.request(direction);
        }

        let status = self.engine.tick(self.steering.heading());
        if status.is_terminal() {
            info!(
                "game over: {:?} with score {} after {} steps",
                status,
                self.engine.score(),
                self.engine.steps()
            );
            self.metrics.on_game_over(self.engine.score(), status);
        }
        status
    }

    fn reset_game(&mut self) {
        self.engine.reset();
        self.steering = Steering::default();
        self.metrics.on_game_start();
        self.pending_direction = None;
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode() -> HumanMode {
        HumanMode::new(GameConfig::small().with_seed(5)).unwrap()
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(mode.engine.is_running());
        assert_eq!(mode.engine.score(), 0);
        assert_eq!(mode.steering.heading(), Direction::Right);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(HumanMode::new(GameConfig::new(3)).is_err());
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut mode = mode();
        let head = mode.engine.head();

        mode.pending_direction = Some(Direction::Left);
        assert_eq!(mode.update_game(), Status::Continue);
        assert_eq!(mode.engine.head(), head.moved_in_direction(Direction::Right));
    }

    #[test]
    fn test_steering_turns_the_snake() {
        let mut mode = mode();
        let head = mode.engine.head();

        mode.pending_direction = Some(Direction::Up);
        mode.update_game();
        assert_eq!(mode.engine.head(), head.moved_in_direction(Direction::Up));
        // Heading persists without further input
        mode.update_game();
        assert_eq!(mode.engine.head(), head.moved_by(-2, 0));
    }

    #[test]
    fn test_wall_loss_is_recorded() {
        let mut mode = mode();
        mode.pending_direction = Some(Direction::Up);
        let mut status = Status::Continue;
        for _ in 0..mode.engine.board_size() {
            status = mode.update_game();
            if status.is_terminal() {
                break;
            }
        }
        // An apple in the way only lengthens the snake, the wall still ends it
        assert_eq!(status, Status::Loss);
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.wins, 0);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.pending_direction = Some(Direction::Up);
        mode.update_game();
        mode.paused = true;

        mode.reset_game();
        assert!(mode.engine.is_running());
        assert_eq!(mode.engine.steps(), 0);
        assert_eq!(mode.steering.heading(), Direction::Right);
        assert!(!mode.paused);
    }
}
