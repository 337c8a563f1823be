use std::collections::BTreeSet;

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::simulation::geometry::{Cell, Pose, WorldBounds};
use crate::simulation::params::{
    HOME, MAX_MOVES, MAX_WORLD_SIZE, MIN_WORLD_SIZE, PIT_PROBABILITY, SCORE_ACTION, SCORE_DEATH,
    SCORE_GOLD, SCORE_SHOOT, START_ORIENTATION,
};
use crate::simulation::percept::{Action, Percept};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("world size {0} outside {MIN_WORLD_SIZE}..={MAX_WORLD_SIZE}")]
    InvalidSize(i32),

    #[error("{what} at {cell} lies outside the world")]
    OutOfWorld { what: &'static str, cell: Cell },

    #[error("{what} may not be placed on the home cell")]
    OnHome { what: &'static str },
}

/// Fixed contents of a world: where the wumpus, gold and pits are.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldLayout {
    pub size: i32,
    pub wumpus: Cell,
    pub gold: Cell,
    pub pits: BTreeSet<Cell>,
}

impl WorldLayout {
    /// Draws a random layout: gold and wumpus anywhere but home, and a pit
    /// in each remaining cell with probability `PIT_PROBABILITY`.
    ///
    /// # Errors
    /// Returns [`WorldError::InvalidSize`] for sizes outside the supported range.
    pub fn random(size: i32, rng: &mut impl Rng) -> Result<Self, WorldError> {
        check_size(size)?;
        let wumpus = random_non_home(size, rng);
        let gold = random_non_home(size, rng);
        let pits = WorldBounds::new(size)
            .cells()
            .filter(|c| *c != HOME && *c != wumpus && *c != gold)
            .filter(|_| rng.random_bool(PIT_PROBABILITY))
            .collect();
        Ok(Self {
            size,
            wumpus,
            gold,
            pits,
        })
    }

    fn validate(&self) -> Result<(), WorldError> {
        check_size(self.size)?;
        let bounds = WorldBounds::new(self.size);
        let placed = [("wumpus", self.wumpus), ("gold", self.gold)]
            .into_iter()
            .chain(self.pits.iter().map(|p| ("pit", *p)));
        for (what, cell) in placed {
            if !bounds.contains(cell) {
                return Err(WorldError::OutOfWorld { what, cell });
            }
        }
        if self.wumpus == HOME {
            return Err(WorldError::OnHome { what: "wumpus" });
        }
        if self.pits.contains(&HOME) {
            return Err(WorldError::OnHome { what: "pit" });
        }
        Ok(())
    }
}

fn random_non_home(size: i32, rng: &mut impl Rng) -> Cell {
    loop {
        let c = Cell::new(rng.random_range(1..=size), rng.random_range(1..=size));
        if c != HOME {
            return c;
        }
    }
}

fn check_size(size: i32) -> Result<(), WorldError> {
    if (MIN_WORLD_SIZE..=MAX_WORLD_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(WorldError::InvalidSize(size))
    }
}

/// How a step left the episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Died(Cell),
    Climbed { with_gold: bool },
    OutOfMoves,
}

impl StepOutcome {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// The true world the agent acts in: generates percepts, applies actions and
/// keeps score.
#[derive(Clone, Debug)]
pub struct WumpusWorld {
    layout: WorldLayout,
    agent: Pose,
    has_gold: bool,
    has_arrow: bool,
    wumpus_alive: bool,
    bump: bool,
    scream: bool,
    score: i64,
    moves: u32,
    outcome: StepOutcome,
}

impl WumpusWorld {
    /// Builds a world from an explicit layout.
    ///
    /// # Errors
    /// Returns a [`WorldError`] if anything is placed outside the world or a
    /// hazard sits on the home cell.
    pub fn new(layout: WorldLayout) -> Result<Self, WorldError> {
        layout.validate()?;
        Ok(Self::fresh(layout))
    }

    fn fresh(layout: WorldLayout) -> Self {
        Self {
            layout,
            agent: Pose::new(HOME, START_ORIENTATION),
            has_gold: false,
            has_arrow: true,
            wumpus_alive: true,
            bump: false,
            scream: false,
            score: 0,
            moves: 0,
            outcome: StepOutcome::Continue,
        }
    }

    /// Builds a random world of the given size.
    ///
    /// # Errors
    /// Returns [`WorldError::InvalidSize`] for unsupported sizes.
    pub fn random(size: i32, rng: &mut impl Rng) -> Result<Self, WorldError> {
        Self::new(WorldLayout::random(size, rng)?)
    }

    /// Puts the agent back at the start with the same layout.
    pub fn reset(&mut self) {
        *self = Self::fresh(self.layout.clone());
    }

    #[must_use]
    pub const fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    #[must_use]
    pub const fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.layout.size)
    }

    #[must_use]
    pub const fn agent(&self) -> Pose {
        self.agent
    }

    #[must_use]
    pub const fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub const fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub const fn has_gold(&self) -> bool {
        self.has_gold
    }

    #[must_use]
    pub const fn wumpus_alive(&self) -> bool {
        self.wumpus_alive
    }

    #[must_use]
    pub const fn outcome(&self) -> StepOutcome {
        self.outcome
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// What the agent senses in its current cell.
    #[must_use]
    pub fn percept(&self) -> Percept {
        let here = self.agent.location;
        let near = |c: Cell| c == here || c.is_adjacent(here);
        Percept {
            stench: near(self.layout.wumpus),
            breeze: self.layout.pits.iter().any(|p| p.is_adjacent(here)),
            glitter: !self.has_gold && self.layout.gold == here,
            bump: self.bump,
            scream: self.scream,
        }
    }

    /// Applies one action. Steps after the episode ended change nothing.
    pub fn step(&mut self, action: Action) -> StepOutcome {
        if self.is_over() {
            return self.outcome;
        }
        self.bump = false;
        self.scream = false;
        self.moves += 1;
        self.score += SCORE_ACTION;

        match action {
            Action::TurnLeft => self.agent = self.agent.turned_left(),
            Action::TurnRight => self.agent = self.agent.turned_right(),
            Action::MoveForward => self.move_forward(),
            Action::Grab => {
                if !self.has_gold && self.layout.gold == self.agent.location {
                    self.has_gold = true;
                }
            }
            Action::Shoot => self.shoot(),
            Action::Climb => {
                if self.agent.location == HOME {
                    if self.has_gold {
                        self.score += SCORE_GOLD;
                    }
                    self.outcome = StepOutcome::Climbed {
                        with_gold: self.has_gold,
                    };
                }
            }
        }

        if !self.is_over() && self.moves >= MAX_MOVES {
            self.outcome = StepOutcome::OutOfMoves;
        }
        debug!(%action, cell = %self.agent.location, score = self.score, "world step");
        self.outcome
    }

    fn move_forward(&mut self) {
        let next = self.agent.ahead();
        if !self.bounds().contains(next) {
            self.bump = true;
            return;
        }
        self.agent.location = next;
        let eaten = self.wumpus_alive && self.layout.wumpus == next;
        if eaten || self.layout.pits.contains(&next) {
            self.score += SCORE_DEATH;
            self.outcome = StepOutcome::Died(next);
        }
    }

    fn shoot(&mut self) {
        if !self.has_arrow {
            return;
        }
        self.has_arrow = false;
        self.score += SCORE_SHOOT;
        let bounds = self.bounds();
        let mut cell = self.agent.ahead();
        while bounds.contains(cell) {
            if self.wumpus_alive && cell == self.layout.wumpus {
                self.wumpus_alive = false;
                self.scream = true;
                return;
            }
            cell = cell.step(self.agent.orientation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_layout_respects_home() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let layout = WorldLayout::random(4, &mut rng).unwrap();
            assert_ne!(layout.wumpus, HOME);
            assert_ne!(layout.gold, HOME);
            assert!(!layout.pits.contains(&HOME));
            assert!(layout.validate().is_ok());
        }
    }

    #[test]
    fn test_invalid_size_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            WorldLayout::random(12, &mut rng).unwrap_err(),
            WorldError::InvalidSize(12)
        );
    }
}
