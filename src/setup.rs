use rand::{seq::SliceRandom, Rng};

use crate::{
    grid::{self, CellKind, Grid},
    Error,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSettings {
    pub width: usize,
    pub height: usize,
    /// Percentage of cells turned into obstacles.
    pub obstacle_density: u32,
    /// Percentage of cells holding a bonus.
    pub bonus_density: u32,
}

impl GridSettings {
    pub fn new(width: usize, height: usize, obstacle_density: u32, bonus_density: u32) -> Self {
        Self {
            width,
            height,
            obstacle_density,
            bonus_density,
        }
    }

    /// Number of cells, `InvalidDimensions` when a side is zero or larger than
    /// `grid::MAX_SIDE_LEN`.
    pub fn cell_n(&self) -> Result<usize, Error> {
        grid::cell_n(self.width, self.height)
    }

    pub fn obstacle_n(&self) -> Result<usize, Error> {
        self.density_count(self.obstacle_density)
    }

    pub fn bonus_n(&self) -> Result<usize, Error> {
        self.density_count(self.bonus_density)
    }

    fn density_count(&self, density: u32) -> Result<usize, Error> {
        if density > 100 {
            return Err(Error::InvalidDensity(density));
        }

        self.cell_n()?
            .checked_mul(density as usize)
            .map(|n| n / 100)
            .ok_or(Error::InvalidDimensions(self.width, self.height))
    }

    /// Checks the settings, returning the cell, obstacle and bonus counts.
    fn check(&self) -> Result<(usize, usize, usize), Error> {
        let cell_n = self.cell_n()?;
        let obstacle_n = self.obstacle_n()?;
        let bonus_n = self.bonus_n()?;

        // Robot and goal need a cell each.
        let needed = obstacle_n + bonus_n + 2;
        if needed > cell_n {
            return Err(Error::NotEnoughRoom(needed, cell_n));
        }

        Ok((cell_n, obstacle_n, bonus_n))
    }
}

/// Scatters obstacles, bonuses, the robot and the goal over distinct random cells.
pub fn generate_grid<R: Rng + ?Sized>(settings: &GridSettings, rng: &mut R) -> Result<Grid, Error> {
    let (cell_n, obstacle_n, bonus_n) = settings.check()?;

    let mut cell_inds = (0..cell_n).collect::<Vec<_>>();
    cell_inds.shuffle(rng);
    let mut cells = vec![CellKind::Empty; cell_n];
    let kinds = std::iter::repeat(CellKind::Obstacle)
        .take(obstacle_n)
        .chain(std::iter::repeat(CellKind::Bonus).take(bonus_n))
        .chain([CellKind::Robot, CellKind::Goal]);
    for (ind, kind) in cell_inds.into_iter().zip(kinds) {
        cells[ind] = kind;
    }

    let grid = Grid::from_cells(settings.width, settings.height, cells)?;
    log::info!(
        "Generated {} x {} grid, robot at {}, goal at {}.",
        settings.width,
        settings.height,
        grid.robot_pos(),
        grid.goal_pos()
    );
    Ok(grid)
}
