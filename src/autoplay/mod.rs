//! Autonomous play along a covering cycle
//!
//! Provides:
//! - The fixed cycle over an even board and its shortcut edges (route module)
//! - A memoryless move picker that reads a board snapshot each tick (solver module)

pub mod route;
pub mod solver;

pub use route::{RouteGraph, RouteNode};
pub use solver::{AutoPlayer, Decision, Rejection, Turn};
