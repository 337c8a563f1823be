//! Route planning for the agent.
//!
//! This module provides:
//! - The `PathPlanner` contract the decision engine routes through
//! - `AStarPlanner`, an informed search over safe cells

mod astar;

pub use astar::AStarPlanner;

use crate::simulation::error::AgentError;
use crate::simulation::geometry::{Cell, Pose};
use crate::simulation::percept::Action;

/// Owned route-finding collaborator.
///
/// The safety map must be updated before any `find_path` call that depends on it.
pub trait PathPlanner {
    fn add_safe_location(&mut self, cell: Cell);

    fn remove_safe_location(&mut self, cell: Cell);

    /// Minimal-cost sequence of `TurnLeft`, `TurnRight` and `MoveForward`
    /// leading from `start` to `goal` through safe cells only.
    ///
    /// # Errors
    /// Returns [`AgentError::NoPath`] when the safety map holds no such route.
    fn find_path(&self, start: Pose, goal: Pose) -> Result<Vec<Action>, AgentError>;
}
