use tracing::{debug, info, warn};

use crate::simulation::error::AgentError;
use crate::simulation::geometry::{Cell, Pose};
use crate::simulation::inference::locate_hazard;
use crate::simulation::knowledge::{Discovery, KnowledgeBase};
use crate::simulation::params::{GOAL_ORIENTATION, HOME};
use crate::simulation::percept::{Action, Percept};
use crate::simulation::planning::{AStarPlanner, PathPlanner};

/// Interface the environment drives once per life and once per step.
pub trait Agent {
    /// Called at the start of every life.
    fn initialize(&mut self);

    /// Chooses exactly one action for the current percept.
    ///
    /// # Errors
    /// Returns an [`AgentError`] when the agent's own bookkeeping breaks down.
    fn process(&mut self, percept: &Percept) -> Result<Action, AgentError>;

    /// Called once when all lives are over.
    fn game_over(&mut self, score: i64);

    /// Read access to the agent's beliefs, for agents that keep any.
    fn knowledge(&self) -> Option<&KnowledgeBase> {
        None
    }
}

/// Why a destination was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    /// Carry the target back to the exit.
    Home,
    /// Go back for a target found in an earlier life.
    Target(Cell),
    /// Unvisited cell proven safe.
    SafeFrontier(Cell),
    /// Deduced hazard cell, to be cleared with the arrow.
    Hazard(Cell),
    /// Unvisited cell of unknown safety.
    RiskyFrontier(Cell),
    /// Nothing left to explore.
    GiveUp,
}

impl Destination {
    #[must_use]
    pub const fn cell(self) -> Cell {
        match self {
            Self::Home | Self::GiveUp => HOME,
            Self::Target(c) | Self::SafeFrontier(c) | Self::Hazard(c) | Self::RiskyFrontier(c) => {
                c
            }
        }
    }
}

/// Knowledge-based agent that explores safely, deduces the hazard and
/// retrieves the target.
///
/// Each call to [`Agent::process`] folds the percept into the knowledge base,
/// then either continues the cached route or picks a new destination and asks
/// the planner for a route to it.
#[derive(Clone, Debug)]
pub struct PlanningAgent<P = AStarPlanner> {
    knowledge: KnowledgeBase,
    planner: P,
    last_destination: Option<Destination>,
}

impl Default for PlanningAgent<AStarPlanner> {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanningAgent<AStarPlanner> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_planner(AStarPlanner::new())
    }
}

impl<P: PathPlanner> PlanningAgent<P> {
    pub fn with_planner(planner: P) -> Self {
        let mut agent = Self {
            knowledge: KnowledgeBase::new(),
            planner,
            last_destination: None,
        };
        agent.planner.add_safe_location(HOME);
        agent
    }

    pub const fn planner(&self) -> &P {
        &self.planner
    }

    #[must_use]
    pub const fn last_destination(&self) -> Option<Destination> {
        self.last_destination
    }

    /// Destination priority for an empty route.
    fn choose_destination(&mut self) -> Destination {
        let kb = &self.knowledge;
        let here = kb.pose().location;

        if kb.has_target() {
            return Destination::Home;
        }
        if let Some(target) = kb.target().filter(|t| *t != here) {
            return Destination::Target(target);
        }
        if let Some(cell) = kb.nearest_safe_frontier() {
            return Destination::SafeFrontier(cell);
        }

        if kb.hazard().is_none() {
            let stench: Vec<Cell> = kb.stench_cells().collect();
            if let Some(d) = locate_hazard(&stench, |c| kb.is_known_safe(c)) {
                info!(
                    hazard = %d.hazard,
                    safe_elbow = %d.safe_elbow,
                    pair = ?d.pair,
                    "hazard located"
                );
                self.knowledge.set_hazard(d.hazard);
            }
        }
        let kb = &self.knowledge;
        if let Some(hazard) = kb.hazard().filter(|h| !kb.is_visited(*h)) {
            return Destination::Hazard(hazard);
        }
        match kb.nearest_frontier() {
            Some(cell) => Destination::RiskyFrontier(cell),
            None => Destination::GiveUp,
        }
    }

    /// Picks a destination and caches a route to it.
    ///
    /// Returns `Some(Climb)` when there is nowhere left to go and the agent
    /// already stands on the exit.
    fn replan(&mut self) -> Result<Option<Action>, AgentError> {
        let destination = self.choose_destination();
        self.last_destination = Some(destination);
        let here = self.knowledge.pose().location;
        let goal = destination.cell();

        if goal == here {
            if here != HOME {
                return Err(AgentError::InconsistentKnowledge(format!(
                    "destination {destination:?} is the current cell {here}"
                )));
            }
            info!("nothing left to explore, leaving");
            return Ok(Some(Action::Climb));
        }
        match destination {
            Destination::RiskyFrontier(cell) => warn!(%cell, "no safe option, taking a risk"),
            _ => debug!(?destination, "routing"),
        }

        self.planner.add_safe_location(goal);
        let route = self
            .planner
            .find_path(self.knowledge.pose(), Pose::new(goal, GOAL_ORIENTATION))?;
        self.knowledge.set_plan(route)?;
        Ok(None)
    }

    /// True when the head of the route would walk into the live hazard.
    fn must_shoot(&self) -> bool {
        let kb = &self.knowledge;
        kb.next_planned() == Some(Action::MoveForward)
            && kb.hazard_alive()
            && kb.has_arrow()
            && kb.hazard() == Some(kb.pose().ahead())
    }
}

impl<P: PathPlanner> Agent for PlanningAgent<P> {
    fn initialize(&mut self) {
        if let Some(cell) = self.knowledge.initialize() {
            warn!(%cell, "previous life ended here, marking fatal");
            self.planner.remove_safe_location(cell);
        }
        self.last_destination = None;
    }

    fn process(&mut self, percept: &Percept) -> Result<Action, AgentError> {
        if self.knowledge.has_target() && self.knowledge.pose().location == HOME {
            return Ok(Action::Climb);
        }

        if let Some(missing) = self.knowledge.observe_bump(percept.bump) {
            self.planner.remove_safe_location(missing);
        }
        self.knowledge.observe_scream(percept.scream);
        if let Discovery::New { .. } = self.knowledge.observe_cell(percept)? {
            self.planner.add_safe_location(self.knowledge.pose().location);
        }

        if percept.glitter {
            self.knowledge.observe_target();
            info!(cell = %self.knowledge.pose().location, "target grabbed");
            return Ok(Action::Grab);
        }

        if self.knowledge.next_planned().is_none() {
            if let Some(action) = self.replan()? {
                return Ok(action);
            }
        }

        if self.must_shoot() {
            self.knowledge.apply(Action::Shoot)?;
            return Ok(Action::Shoot);
        }
        self.knowledge.pop_planned()
    }

    fn game_over(&mut self, score: i64) {
        info!(score, visited = self.knowledge.visited().count(), "game over");
    }

    fn knowledge(&self) -> Option<&KnowledgeBase> {
        Some(&self.knowledge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_cells() {
        assert_eq!(Destination::Home.cell(), HOME);
        assert_eq!(Destination::GiveUp.cell(), HOME);
        let c = Cell::new(3, 2);
        assert_eq!(Destination::Hazard(c).cell(), c);
    }

    #[test]
    fn test_home_is_safe_for_planner() {
        let agent = PlanningAgent::new();
        assert!(agent.planner().is_safe(HOME));
    }

    #[test]
    fn test_first_step_explores() {
        let mut agent = PlanningAgent::new();
        agent.initialize();
        let action = agent.process(&Percept::quiet()).unwrap();
        assert!(action.is_navigation());
        assert!(matches!(
            agent.last_destination(),
            Some(Destination::SafeFrontier(_))
        ));
    }
}
