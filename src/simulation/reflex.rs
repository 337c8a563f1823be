//! Memoryless baseline agent.

use rand::Rng;

use crate::simulation::agent::Agent;
use crate::simulation::error::AgentError;
use crate::simulation::geometry::{Pose, WorldBounds};
use crate::simulation::params::{HOME, START_ORIENTATION};
use crate::simulation::percept::{Action, Percept};

/// Reacts to the current percept only, wandering at random otherwise.
///
/// The world size is given up front; moves that would leave it are clamped
/// rather than rejected.
#[derive(Clone, Debug)]
pub struct ReflexAgent<R> {
    rng: R,
    bounds: WorldBounds,
    pose: Pose,
    has_target: bool,
    has_arrow: bool,
}

impl<R: Rng> ReflexAgent<R> {
    pub fn new(rng: R, world_size: i32) -> Self {
        Self {
            rng,
            bounds: WorldBounds::new(world_size),
            pose: Pose::new(HOME, START_ORIENTATION),
            has_target: false,
            has_arrow: true,
        }
    }

    #[must_use]
    pub const fn pose(&self) -> Pose {
        self.pose
    }
}

impl<R: Rng> Agent for ReflexAgent<R> {
    fn initialize(&mut self) {
        self.pose = Pose::new(HOME, START_ORIENTATION);
        self.has_target = false;
        self.has_arrow = true;
    }

    fn process(&mut self, percept: &Percept) -> Result<Action, AgentError> {
        if percept.glitter {
            self.has_target = true;
            return Ok(Action::Grab);
        }
        if self.has_target && self.pose.location == HOME {
            return Ok(Action::Climb);
        }
        if self.has_arrow && percept.stench {
            self.has_arrow = false;
            return Ok(Action::Shoot);
        }
        let action = match self.rng.random_range(0..3) {
            0 => {
                self.pose = self.pose.turned_left();
                Action::TurnLeft
            }
            1 => {
                self.pose = self.pose.turned_right();
                Action::TurnRight
            }
            _ => {
                self.pose = self.pose.moved_clamped(&self.bounds);
                Action::MoveForward
            }
        };
        Ok(action)
    }

    fn game_over(&mut self, _score: i64) {}
}
