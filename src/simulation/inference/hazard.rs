//! Diagonal elimination for the hazard location.

use crate::simulation::geometry::Cell;

/// A successful localization and the evidence behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deduction {
    pub hazard: Cell,
    pub pair: (Cell, Cell),
    /// The elbow proven safe, which leaves `hazard` as the only candidate.
    pub safe_elbow: Cell,
}

/// The two cells completing the right angle between diagonal cells `a` and `b`.
///
/// Returns `None` unless the cells differ by exactly one on both axes.
#[must_use]
pub fn elbows(a: Cell, b: Cell) -> Option<(Cell, Cell)> {
    if a.x.abs_diff(b.x) == 1 && a.y.abs_diff(b.y) == 1 {
        Some((Cell::new(a.x, b.y), Cell::new(b.x, a.y)))
    } else {
        None
    }
}

/// Searches every diagonal pair of stench cells for a conclusive elimination.
///
/// A pair concludes only when exactly one elbow is known safe; with neither or
/// both safe it yields nothing and is reconsidered on a later call.
pub fn locate_hazard<F>(stench_cells: &[Cell], is_safe: F) -> Option<Deduction>
where
    F: Fn(Cell) -> bool,
{
    for (i, &a) in stench_cells.iter().enumerate() {
        for &b in &stench_cells[i + 1..] {
            let Some((e1, e2)) = elbows(a, b) else {
                continue;
            };
            let deduction = match (is_safe(e1), is_safe(e2)) {
                (true, false) => Deduction {
                    hazard: e2,
                    pair: (a, b),
                    safe_elbow: e1,
                },
                (false, true) => Deduction {
                    hazard: e1,
                    pair: (a, b),
                    safe_elbow: e2,
                },
                _ => continue,
            };
            return Some(deduction);
        }
    }
    None
}
