//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine is driven one tick at a time, either by a human or by the autoplayer.

pub mod action;
pub mod apple_pool;
pub mod body_queue;
pub mod config;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use apple_pool::ApplePositionPool;
pub use body_queue::BodySegmentQueue;
pub use config::GameConfig;
pub use engine::GameEngine;
pub use error::GameError;
pub use snapshot::{Snapshot, SnapshotError};
pub use state::{Cell, Position, Status};
