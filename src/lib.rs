//! Knowledge-based planning agent for the Wumpus World.
//!
//! The agent explores an unknown grid, infers which cells are safe from
//! stench and breeze clues, deduces the wumpus location when it can, and
//! brings the gold back to the exit.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod simulation;
pub mod ui;
