//! Logical inference over accumulated clues.
//!
//! A single hidden hazard produces a stench in every cell 4-adjacent to it.
//! Two stench cells on a diagonal share exactly two neighbors, the "elbows";
//! the hazard must be one of them. If one elbow is proven safe, it is the other.

mod hazard;

pub use hazard::{elbows, locate_hazard, Deduction};
