//! Grid coordinates, headings and world bounds.
//!
//! Cells are 1-indexed: a world of size `n` spans `1..=n` on both axes.

use std::fmt;

use crate::simulation::error::AgentError;
use crate::simulation::params::MAX_WORLD_SIZE;

/// A grid coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the cell one step away in the given heading.
    #[must_use]
    pub const fn step(self, orientation: Orientation) -> Self {
        let (dx, dy) = orientation.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// City-block distance between two cells.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four axis-aligned neighbors, unfiltered.
    #[must_use]
    pub fn adjacent(self) -> [Self; 4] {
        Orientation::all().map(|o| self.step(o))
    }

    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Heading of the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    /// Unit vector for a forward step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Right => (1, 0),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
        }
    }

    #[must_use]
    pub const fn turn_left(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
        }
    }

    #[must_use]
    pub const fn turn_right(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// True for headings that move along the x axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Right | Self::Left)
    }

    /// Returns all four headings.
    #[must_use]
    pub const fn all() -> [Orientation; 4] {
        [Self::Up, Self::Right, Self::Down, Self::Left]
    }
}

/// Location plus heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pose {
    pub location: Cell,
    pub orientation: Orientation,
}

impl Pose {
    #[must_use]
    pub const fn new(location: Cell, orientation: Orientation) -> Self {
        Self {
            location,
            orientation,
        }
    }

    /// The cell a `MoveForward` would enter.
    #[must_use]
    pub const fn ahead(&self) -> Cell {
        self.location.step(self.orientation)
    }

    #[must_use]
    pub const fn turned_left(self) -> Self {
        Self::new(self.location, self.orientation.turn_left())
    }

    #[must_use]
    pub const fn turned_right(self) -> Self {
        Self::new(self.location, self.orientation.turn_right())
    }

    /// Steps forward, rejecting any location outside `bounds`.
    ///
    /// # Errors
    /// Returns [`AgentError::OutOfBounds`] when the step would leave the world.
    pub fn moved(self, bounds: &WorldBounds) -> Result<Self, AgentError> {
        let next = self.ahead();
        if !bounds.contains(next) {
            return Err(AgentError::OutOfBounds {
                from: self.location,
                orientation: self.orientation,
                size: bounds.size(),
            });
        }
        Ok(Self::new(next, self.orientation))
    }

    /// Steps forward, clamping each coordinate into `bounds`.
    #[must_use]
    pub fn moved_clamped(self, bounds: &WorldBounds) -> Self {
        Self::new(bounds.clamp(self.ahead()), self.orientation)
    }
}

/// Believed extent of the square world.
///
/// Starts at the optimistic maximum and only ever shrinks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldBounds {
    size: i32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(MAX_WORLD_SIZE)
    }
}

impl WorldBounds {
    #[must_use]
    pub const fn new(size: i32) -> Self {
        Self { size }
    }

    #[must_use]
    pub const fn size(&self) -> i32 {
        self.size
    }

    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x >= 1 && cell.y >= 1 && cell.x <= self.size && cell.y <= self.size
    }

    /// Shrinks the bound to `size`. Returns true if anything changed.
    pub fn shrink_to(&mut self, size: i32) -> bool {
        if size < self.size {
            self.size = size;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn clamp(&self, cell: Cell) -> Cell {
        Cell::new(cell.x.clamp(1, self.size), cell.y.clamp(1, self.size))
    }

    /// The in-bounds 4-neighbors of `cell`.
    #[must_use]
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        cell.adjacent()
            .into_iter()
            .filter(|c| self.contains(*c))
            .collect()
    }

    /// Every cell inside the bound, row-major from `(1,1)`.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (1..=self.size).flat_map(move |y| (1..=self.size).map(move |x| Cell::new(x, y)))
    }
}
