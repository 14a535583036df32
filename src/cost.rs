//! Movement cost and distance estimate on the 4-connected grid.

use crate::grid::Position;

/// Cost of one orthogonal step, the same everywhere on the grid.
pub fn step_cost(_from: &Position, _to: &Position) -> usize {
    1
}

/// Manhattan distance to the goal. Never overestimates with unit steps and no diagonals.
pub fn heuristic(pos: &Position, goal: &Position) -> usize {
    pos.x.abs_diff(goal.x) + pos.y.abs_diff(goal.y)
}

pub fn is_adjacent(a: &Position, b: &Position) -> bool {
    heuristic(a, b) == 1
}
