//! State rebuilt at the start of every life.

use std::collections::VecDeque;

use crate::simulation::geometry::Pose;
use crate::simulation::params::{HOME, START_ORIENTATION};
use crate::simulation::percept::Action;

#[derive(Clone, Debug)]
pub struct EpisodeState {
    pub(super) pose: Pose,
    pub(super) has_target: bool,
    pub(super) has_arrow: bool,
    pub(super) hazard_alive: bool,
    /// Set by a forward step, consumed by the next percept.
    pub(super) advanced: bool,
    /// Pending navigation actions, head first.
    pub(super) plan: VecDeque<Action>,
}

impl Default for EpisodeState {
    fn default() -> Self {
        Self {
            pose: Pose::new(HOME, START_ORIENTATION),
            has_target: false,
            has_arrow: true,
            hazard_alive: true,
            advanced: false,
            plan: VecDeque::new(),
        }
    }
}
