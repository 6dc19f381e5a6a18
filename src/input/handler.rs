use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::game::Direction;

/// Playback rates for watching the autoplayer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSpeed {
    Slow,
    Normal,
    Fast,
    Turbo,
}

impl PlaybackSpeed {
    /// Time between autoplay ticks
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::Turbo => Duration::from_millis(16),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::Turbo => "Turbo",
        }
    }
}

/// What a key press asks the current mode to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Speed(PlaybackSpeed),
    Pause,
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = Self::direction_for(key.code) {
            return KeyAction::Steer(direction);
        }

        match key.code {
            KeyCode::Char('1') => KeyAction::Speed(PlaybackSpeed::Slow),
            KeyCode::Char('2') => KeyAction::Speed(PlaybackSpeed::Normal),
            KeyCode::Char('3') => KeyAction::Speed(PlaybackSpeed::Fast),
            KeyCode::Char('4') => KeyAction::Speed(PlaybackSpeed::Turbo),
            KeyCode::Char(' ') | KeyCode::Enter => KeyAction::Pause,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    /// Arrow keys and WASD, either case
    fn direction_for(code: KeyCode) -> Option<Direction> {
        match code {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Direction::Up),
                's' => Some(Direction::Down),
                'a' => Some(Direction::Left),
                'd' => Some(Direction::Right),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Heading of a hand-steered snake; a request to reverse onto the neck is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steering {
    heading: Direction,
}

impl Steering {
    pub fn new(heading: Direction) -> Self {
        Self { heading }
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns the heading in force after the request
    pub fn request(&mut self, direction: Direction) -> Direction {
        if !self.heading.is_opposite(direction) {
            self.heading = direction;
        }
        self.heading
    }
}

impl Default for Steering {
    fn default() -> Self {
        Self::new(Direction::Right)
    }
}
