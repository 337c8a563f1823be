//! A* route search over poses restricted to safe cells.
//!
//! States are `(cell, heading)` pairs; every primitive action costs one step.
//! The city-block distance between locations ignores heading and never
//! overestimates, so the first goal popped is optimal.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::trace;

use crate::simulation::error::AgentError;
use crate::simulation::geometry::{Cell, Pose};
use crate::simulation::percept::Action;

use super::PathPlanner;

/// Informed search through the cells registered as safe.
#[derive(Clone, Debug, Default)]
pub struct AStarPlanner {
    safe: HashSet<Cell>,
}

impl AStarPlanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_safe(&self, cell: Cell) -> bool {
        self.safe.contains(&cell)
    }

    #[must_use]
    pub fn safe_count(&self) -> usize {
        self.safe.len()
    }

    /// Admissible estimate of the remaining cost.
    #[must_use]
    pub const fn heuristic(from: Pose, goal: Pose) -> u32 {
        from.location.manhattan(goal.location)
    }

    fn successors(&self, pose: Pose) -> impl Iterator<Item = (Action, Pose)> + '_ {
        let ahead = pose.ahead();
        let forward = self
            .safe
            .contains(&ahead)
            .then(|| (Action::MoveForward, Pose::new(ahead, pose.orientation)));
        [
            Some((Action::TurnLeft, pose.turned_left())),
            Some((Action::TurnRight, pose.turned_right())),
            forward,
        ]
        .into_iter()
        .flatten()
    }
}

impl PathPlanner for AStarPlanner {
    fn add_safe_location(&mut self, cell: Cell) {
        self.safe.insert(cell);
    }

    fn remove_safe_location(&mut self, cell: Cell) {
        self.safe.remove(&cell);
    }

    fn find_path(&self, start: Pose, goal: Pose) -> Result<Vec<Action>, AgentError> {
        let mut open = BinaryHeap::new();
        let mut best_cost: HashMap<Pose, u32> = HashMap::new();
        let mut came_from: HashMap<Pose, (Pose, Action)> = HashMap::new();
        let mut seq: u64 = 0;

        best_cost.insert(start, 0);
        open.push(Reverse((Self::heuristic(start, goal), seq, 0u32, start)));

        while let Some(Reverse((_, _, cost, pose))) = open.pop() {
            if pose == goal {
                let mut actions = Vec::with_capacity(cost as usize);
                let mut cursor = pose;
                while let Some(&(prev, action)) = came_from.get(&cursor) {
                    actions.push(action);
                    cursor = prev;
                }
                actions.reverse();
                trace!(from = %start.location, to = %goal.location, steps = actions.len(), "route found");
                return Ok(actions);
            }
            if best_cost.get(&pose).is_some_and(|&c| c < cost) {
                continue;
            }
            for (action, next) in self.successors(pose) {
                let next_cost = cost + 1;
                if best_cost.get(&next).is_some_and(|&c| c <= next_cost) {
                    continue;
                }
                best_cost.insert(next, next_cost);
                came_from.insert(next, (pose, action));
                seq += 1;
                open.push(Reverse((
                    next_cost + Self::heuristic(next, goal),
                    seq,
                    next_cost,
                    next,
                )));
            }
        }

        Err(AgentError::NoPath {
            from: start.location,
            to: goal.location,
        })
    }
}
