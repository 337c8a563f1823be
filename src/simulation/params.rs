//! Simulation hyperparameters.

use crate::simulation::geometry::{Cell, Orientation};

/// Optimistic upper bound on the world size before any bump is felt.
pub const MAX_WORLD_SIZE: i32 = 9;
pub const MIN_WORLD_SIZE: i32 = 2;
pub const DEFAULT_WORLD_SIZE: i32 = 4;

/// Entry and exit cell of every episode.
pub const HOME: Cell = Cell::new(1, 1);
pub const START_ORIENTATION: Orientation = Orientation::Right;
/// Orientation requested at the end of every planned route.
pub const GOAL_ORIENTATION: Orientation = Orientation::Right;

pub const PIT_PROBABILITY: f64 = 0.2;
pub const MAX_MOVES: u32 = 1000;

pub const SCORE_ACTION: i64 = -1;
pub const SCORE_SHOOT: i64 = -10;
pub const SCORE_DEATH: i64 = -1000;
pub const SCORE_GOLD: i64 = 1000;

pub const DEFAULT_TRIES: u32 = 10;
pub const TICK_RATE_MS: u64 = 250;
