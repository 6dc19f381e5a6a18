//! Cycle Snake - a Snake game that can play itself
//!
//! This library provides:
//! - Core game logic (game module)
//! - Hamiltonian-cycle autoplay with shortcuts (autoplay module)
//! - TUI rendering (render module)
//! - Keyboard input mapping (input module)
//! - Session and simulation metrics (metrics module)
//! - Execution modes: human, watch, simulate (modes module)

pub mod autoplay;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
