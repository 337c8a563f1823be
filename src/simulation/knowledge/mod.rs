//! Belief state of the planning agent.
//!
//! This module provides:
//! - `PersistentKnowledge`: what the agent has learned about the world
//! - `EpisodeState`: pose, possessions and the pending route of the current life
//! - `KnowledgeBase`: the single owner of both, with the percept-driven update rules

mod episode;
mod persistent;

pub use episode::EpisodeState;
pub use persistent::PersistentKnowledge;

use tracing::debug;

use crate::simulation::error::AgentError;
use crate::simulation::geometry::{Cell, Pose, WorldBounds};
use crate::simulation::params::HOME;
use crate::simulation::percept::{Action, Percept};

/// Result of folding one percept's cell information into the beliefs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Discovery {
    /// The current cell had been visited before.
    Known,
    /// First visit; `calm` is true when its neighbors were proven safe.
    New { calm: bool },
}

/// Everything the planning agent believes, updated one percept at a time.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeBase {
    world: PersistentKnowledge,
    episode: EpisodeState,
}

impl KnowledgeBase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new life.
    ///
    /// A life that ended on a cell never processed alive ended by death there;
    /// that cell is returned after being reclassified as fatal. A life cut off
    /// by the move limit right after stepping into a new cell is read the same
    /// way, so that cell is marked fatal too.
    pub fn initialize(&mut self) -> Option<Cell> {
        let last = self.episode.pose.location;
        let died = last != HOME && !self.world.visited.contains(&last);
        if died {
            self.world.record_death(last);
        }
        self.episode = EpisodeState::default();
        died.then_some(last)
    }

    // --- queries -------------------------------------------------------

    #[must_use]
    pub const fn pose(&self) -> Pose {
        self.episode.pose
    }

    #[must_use]
    pub const fn bounds(&self) -> WorldBounds {
        self.world.bounds
    }

    #[must_use]
    pub fn is_visited(&self, cell: Cell) -> bool {
        self.world.visited.contains(&cell)
    }

    #[must_use]
    pub fn is_known_safe(&self, cell: Cell) -> bool {
        self.world.known_safe.contains(&cell)
    }

    #[must_use]
    pub fn is_frontier(&self, cell: Cell) -> bool {
        self.world.frontier.contains(&cell)
    }

    #[must_use]
    pub fn is_fatal(&self, cell: Cell) -> bool {
        self.world.fatal.contains(&cell)
    }

    pub fn visited(&self) -> impl Iterator<Item = Cell> + '_ {
        self.world.visited.iter().copied()
    }

    pub fn known_safe(&self) -> impl Iterator<Item = Cell> + '_ {
        self.world.known_safe.iter().copied()
    }

    pub fn frontier(&self) -> impl Iterator<Item = Cell> + '_ {
        self.world.frontier.iter().copied()
    }

    pub fn stench_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.world.stench_cells.iter().copied()
    }

    #[must_use]
    pub const fn hazard(&self) -> Option<Cell> {
        self.world.hazard
    }

    #[must_use]
    pub const fn target(&self) -> Option<Cell> {
        self.world.target
    }

    #[must_use]
    pub const fn has_target(&self) -> bool {
        self.episode.has_target
    }

    #[must_use]
    pub const fn has_arrow(&self) -> bool {
        self.episode.has_arrow
    }

    #[must_use]
    pub const fn hazard_alive(&self) -> bool {
        self.episode.hazard_alive
    }

    /// The next planned action, if any.
    #[must_use]
    pub fn next_planned(&self) -> Option<Action> {
        self.episode.plan.front().copied()
    }

    #[must_use]
    pub fn planned_len(&self) -> usize {
        self.episode.plan.len()
    }

    /// Nearest frontier cell already proven safe.
    #[must_use]
    pub fn nearest_safe_frontier(&self) -> Option<Cell> {
        self.world.nearest_frontier(self.episode.pose.location, true)
    }

    /// Nearest frontier cell regardless of safety.
    #[must_use]
    pub fn nearest_frontier(&self) -> Option<Cell> {
        self.world.nearest_frontier(self.episode.pose.location, false)
    }

    // --- percept-driven updates -----------------------------------------

    /// Handles a bump: the forward step that produced it never happened.
    ///
    /// The attempted coordinate is one past the true edge, so the bound shrinks
    /// to it minus one. Returns the cell that turned out not to exist.
    pub fn observe_bump(&mut self, bump: bool) -> Option<Cell> {
        let advanced = std::mem::take(&mut self.episode.advanced);
        if !bump || !advanced {
            return None;
        }
        let pose = self.episode.pose;
        let attempted = if pose.orientation.is_horizontal() {
            pose.location.x
        } else {
            pose.location.y
        };
        let back = pose.orientation.turn_left().turn_left();
        self.episode.pose.location = pose.location.step(back);
        self.episode.plan.clear();

        if self.world.bounds.shrink_to(attempted - 1) {
            self.world.retain_in_bounds();
            debug!(size = attempted - 1, "world bound discovered");
        }
        Some(pose.location)
    }

    pub fn observe_scream(&mut self, scream: bool) {
        if scream {
            self.episode.hazard_alive = false;
        }
    }

    /// Folds the clues of the current cell into the beliefs on its first visit.
    ///
    /// # Errors
    /// Returns [`AgentError::InconsistentKnowledge`] when an unvisited cell is
    /// entered that was never on the frontier.
    pub fn observe_cell(&mut self, percept: &Percept) -> Result<Discovery, AgentError> {
        let here = self.episode.pose.location;
        if self.world.visited.contains(&here) {
            return Ok(Discovery::Known);
        }
        // A fatal cell entered alive held the hazard, which is now dead.
        if !self.world.frontier.remove(&here) && !self.world.fatal.remove(&here) {
            return Err(AgentError::InconsistentKnowledge(format!(
                "entered {here} which was not on the frontier"
            )));
        }
        self.world.visited.insert(here);
        self.world.known_safe.insert(here);
        self.episode.plan.clear();

        let neighbors = self.world.bounds.neighbors(here);
        // Standing on the dead hazard's cell, its own stench carries no news.
        let on_corpse = self.world.hazard == Some(here);
        let calm = percept.is_calm() || (on_corpse && !percept.breeze);
        if calm {
            for &n in &neighbors {
                if self.world.hazard != Some(n) && !self.world.fatal.contains(&n) {
                    self.world.known_safe.insert(n);
                }
            }
        } else if percept.stench && !on_corpse {
            self.world.stench_cells.insert(here);
        }
        for n in neighbors {
            if !self.world.visited.contains(&n) && !self.world.fatal.contains(&n) {
                self.world.frontier.insert(n);
            }
        }
        debug!(cell = %here, percept = %percept, calm, "new cell");
        Ok(Discovery::New { calm })
    }

    /// Records the target under the agent and takes possession of it.
    pub fn observe_target(&mut self) {
        self.world.target = Some(self.episode.pose.location);
        self.episode.has_target = true;
        self.episode.plan.clear();
    }

    /// Fixes the hazard location. Later deductions never move it.
    pub fn set_hazard(&mut self, cell: Cell) {
        if self.world.hazard.is_none() {
            self.world.hazard = Some(cell);
        }
    }

    // --- plan bookkeeping ------------------------------------------------

    /// Replaces the pending route.
    ///
    /// # Errors
    /// Returns [`AgentError::InconsistentKnowledge`] if the route holds a
    /// non-navigation action.
    pub fn set_plan(&mut self, actions: Vec<Action>) -> Result<(), AgentError> {
        if let Some(bad) = actions.iter().find(|a| !a.is_navigation()) {
            return Err(AgentError::InconsistentKnowledge(format!(
                "{bad} cannot be part of a route"
            )));
        }
        self.episode.plan = actions.into();
        Ok(())
    }

    /// Removes the head of the route and applies it to the pose.
    ///
    /// # Errors
    /// Propagates [`AgentError::OutOfBounds`] from the forward step, or
    /// [`AgentError::InconsistentKnowledge`] if the route is empty.
    pub fn pop_planned(&mut self) -> Result<Action, AgentError> {
        let action = self.episode.plan.pop_front().ok_or_else(|| {
            AgentError::InconsistentKnowledge("no planned action to execute".into())
        })?;
        self.apply(action)?;
        Ok(action)
    }

    /// Tracks the effect of an emitted action on the episode state.
    ///
    /// # Errors
    /// Returns [`AgentError::OutOfBounds`] for a forward step off the world.
    pub fn apply(&mut self, action: Action) -> Result<(), AgentError> {
        let pose = self.episode.pose;
        match action {
            Action::TurnLeft => self.episode.pose = pose.turned_left(),
            Action::TurnRight => self.episode.pose = pose.turned_right(),
            Action::MoveForward => {
                self.episode.pose = pose.moved(&self.world.bounds)?;
                self.episode.advanced = true;
            }
            Action::Shoot => self.episode.has_arrow = false,
            Action::Grab | Action::Climb => {}
        }
        Ok(())
    }

    /// Checks the structural invariants of the belief state.
    ///
    /// # Errors
    /// Returns [`AgentError::InconsistentKnowledge`] describing the first violation.
    pub fn validate(&self) -> Result<(), AgentError> {
        let w = &self.world;
        let fail = |msg: String| -> Result<(), AgentError> {
            Err(AgentError::InconsistentKnowledge(msg))
        };
        if let Some(c) = w.visited.iter().find(|c| !w.known_safe.contains(c)) {
            return fail(format!("visited {c} is not known safe"));
        }
        if let Some(c) = w.frontier.iter().find(|c| w.visited.contains(c)) {
            return fail(format!("frontier {c} is already visited"));
        }
        if let Some(c) = w.frontier.iter().find(|c| !w.bounds.contains(**c)) {
            return fail(format!("frontier {c} lies outside the world"));
        }
        let orphan = w
            .frontier
            .iter()
            .filter(|c| **c != HOME)
            .find(|c| !c.adjacent().iter().any(|n| w.visited.contains(n)));
        if let Some(c) = orphan {
            return fail(format!("frontier {c} has no visited neighbor"));
        }
        if let Some(h) = w.hazard {
            if !w.visited.contains(&h) && w.known_safe.contains(&h) {
                return fail(format!("hazard {h} was inferred safe"));
            }
        }
        if let Some(a) = self.episode.plan.iter().find(|a| !a.is_navigation()) {
            return fail(format!("{a} queued in route"));
        }
        Ok(())
    }
}
