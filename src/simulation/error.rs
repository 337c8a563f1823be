//! Failures the planning agent surfaces instead of guessing.

use thiserror::Error;

use crate::simulation::geometry::{Cell, Orientation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// A forward step would leave the believed world.
    #[error("move from {from} facing {orientation:?} leaves a world of size {size}")]
    OutOfBounds {
        from: Cell,
        orientation: Orientation,
        size: i32,
    },

    /// The safety map has no route between the two cells.
    #[error("no safe path from {from} to {to}")]
    NoPath { from: Cell, to: Cell },

    /// The belief state broke one of its own invariants.
    #[error("inconsistent knowledge: {0}")]
    InconsistentKnowledge(String),
}
