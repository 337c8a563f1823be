use crate::simulation::environment::WumpusWorld;
use crate::simulation::geometry::{Cell, Orientation, Pose};
use crate::simulation::knowledge::KnowledgeBase;

/// Width of one rendered cell, including padding.
pub const CELL_WIDTH: usize = 3;

const fn heading_char(orientation: Orientation) -> char {
    match orientation {
        Orientation::Up => '^',
        Orientation::Right => '>',
        Orientation::Down => 'v',
        Orientation::Left => '<',
    }
}

/// Maps a cell to its (row, column) in rendered lines; row 0 is the top edge.
#[allow(clippy::cast_sign_loss)]
#[must_use]
pub fn cell_to_grid_coords(cell: Cell, size: i32) -> (usize, usize) {
    let row = (size - cell.y) as usize;
    let col = (cell.x - 1) as usize * CELL_WIDTH + 1;
    (row, col)
}

fn render_rows(size: i32, agent: Pose, mut symbol: impl FnMut(Cell) -> char) -> Vec<String> {
    (1..=size)
        .rev()
        .map(|y| {
            let mut line = String::with_capacity(size as usize * CELL_WIDTH);
            for x in 1..=size {
                let cell = Cell::new(x, y);
                let c = if cell == agent.location {
                    heading_char(agent.orientation)
                } else {
                    symbol(cell)
                };
                line.push(' ');
                line.push(c);
                line.push(' ');
            }
            line
        })
        .collect()
}

/// The true world: `W` live wumpus, `w` dead wumpus, `P` pit, `G` gold.
#[must_use]
pub fn compute_world_grid(world: &WumpusWorld) -> Vec<String> {
    let layout = world.layout();
    render_rows(layout.size, world.agent(), |cell| {
        if cell == layout.wumpus {
            if world.wumpus_alive() {
                'W'
            } else {
                'w'
            }
        } else if layout.pits.contains(&cell) {
            'P'
        } else if cell == layout.gold && !world.has_gold() {
            'G'
        } else {
            '.'
        }
    })
}

/// The agent's beliefs over a `size` x `size` window.
///
/// `H` hazard, `X` fatal, `G` target, `o` visited, `s` safe frontier,
/// `?` risky frontier, `+` inferred safe, `~` stench clue, blank unknown.
#[must_use]
pub fn compute_belief_grid(knowledge: &KnowledgeBase, size: i32) -> Vec<String> {
    render_rows(size, knowledge.pose(), |cell| {
        if knowledge.hazard() == Some(cell) {
            'H'
        } else if knowledge.is_fatal(cell) {
            'X'
        } else if knowledge.target() == Some(cell) {
            'G'
        } else if knowledge.is_visited(cell) {
            if knowledge.stench_cells().any(|c| c == cell) {
                '~'
            } else {
                'o'
            }
        } else if knowledge.is_frontier(cell) {
            if knowledge.is_known_safe(cell) {
                's'
            } else {
                '?'
            }
        } else if knowledge.is_known_safe(cell) {
            '+'
        } else {
            ' '
        }
    })
}
