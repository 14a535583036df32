use crate::{
    cost::is_adjacent,
    grid::{CellKind, Grid, Position},
    game::Outcome,
    pathfind::Path,
    Error,
};

pub const BONUS_SCORE: u32 = 10;

/// Receives the grid after every robot step.
pub trait GridObserver {
    fn observe(&mut self, grid: &Grid, score: u32) -> Result<(), Error>;

    /// Called once with the last grid when a game ends.
    fn finish(&mut self, _grid: &Grid, _outcome: &Outcome) -> Result<(), Error> {
        Ok(())
    }
}

impl<F> GridObserver for F
where
    F: FnMut(&Grid, u32) -> Result<(), Error>,
{
    fn observe(&mut self, grid: &Grid, score: u32) -> Result<(), Error> {
        self(grid, score)
    }
}

/// Moves the robot one cell, picking up a bonus if there's one at `dest`.
pub fn move_robot(grid: &mut Grid, dest: &Position, score: &mut u32) -> Result<(), Error> {
    let robot_pos = grid.robot_pos();
    if !is_adjacent(&robot_pos, dest) || !grid.is_passable(dest) {
        return Err(Error::InvalidMove(robot_pos, *dest));
    }

    if grid.cell_at(dest)? == CellKind::Bonus {
        *score += BONUS_SCORE;
        log::debug!("Picked up bonus at {}, score is now {}.", dest, score);
    }
    // Placing the robot clears its old cell.
    grid.set_cell(dest, CellKind::Robot)
}

/// Walks the robot along `path` and returns the final score.
///
/// A first position equal to the robot's current one is skipped, every other position
/// must be reachable in one step from the previous one.
pub fn execute_path<O: GridObserver>(
    grid: &mut Grid,
    path: &Path,
    score: u32,
    observer: &mut O,
) -> Result<u32, Error> {
    let mut score = score;
    let skip_n = usize::from(path.start() == Some(&grid.robot_pos()));
    for dest in path.iter().skip(skip_n) {
        move_robot(grid, dest, &mut score)?;
        observer.observe(grid, score)?;
    }

    Ok(score)
}
