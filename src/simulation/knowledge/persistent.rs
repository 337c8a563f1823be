//! Beliefs that survive from one life to the next.

use std::collections::BTreeSet;

use crate::simulation::geometry::{Cell, WorldBounds};
use crate::simulation::params::HOME;

/// World knowledge carried across `initialize` calls.
///
/// Sets are ordered so that every choice made from them is reproducible.
#[derive(Clone, Debug)]
pub struct PersistentKnowledge {
    pub(super) bounds: WorldBounds,
    /// Cells the agent has stood on alive.
    pub(super) visited: BTreeSet<Cell>,
    /// Visited cells plus cells proven safe by a calm neighbor.
    pub(super) known_safe: BTreeSet<Cell>,
    /// Unvisited in-bounds neighbors of visited cells.
    pub(super) frontier: BTreeSet<Cell>,
    /// Cells with an unexplained stench.
    pub(super) stench_cells: BTreeSet<Cell>,
    /// Cells where a previous life ended.
    pub(super) fatal: BTreeSet<Cell>,
    pub(super) hazard: Option<Cell>,
    pub(super) target: Option<Cell>,
}

impl Default for PersistentKnowledge {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistentKnowledge {
    /// Fresh knowledge: nothing visited, home waiting on the frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bounds: WorldBounds::default(),
            visited: BTreeSet::new(),
            known_safe: BTreeSet::from([HOME]),
            frontier: BTreeSet::from([HOME]),
            stench_cells: BTreeSet::new(),
            fatal: BTreeSet::new(),
            hazard: None,
            target: None,
        }
    }

    /// Drops frontier cells that no longer fit inside the bounds.
    pub(super) fn retain_in_bounds(&mut self) {
        let bounds = self.bounds;
        self.frontier.retain(|c| bounds.contains(*c));
    }

    /// Reclassifies the cell a life ended on as fatal.
    pub(super) fn record_death(&mut self, cell: Cell) {
        self.frontier.remove(&cell);
        self.known_safe.remove(&cell);
        self.fatal.insert(cell);
    }

    /// Frontier member nearest to `from`, optionally restricted to known-safe cells.
    pub(super) fn nearest_frontier(&self, from: Cell, safe_only: bool) -> Option<Cell> {
        self.frontier
            .iter()
            .copied()
            .filter(|c| !safe_only || self.known_safe.contains(c))
            .min_by_key(|c| (c.manhattan(from), *c))
    }
}
