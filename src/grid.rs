use std::{fmt::Display, str::FromStr};

use crate::Error;

/// Largest accepted width or height of a grid.
pub const MAX_SIDE_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Obstacle,
    Bonus,
    Robot,
    Goal,
}

impl Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

impl From<CellKind> for char {
    fn from(value: CellKind) -> Self {
        match value {
            CellKind::Empty => '.',
            CellKind::Obstacle => 'X',
            CellKind::Bonus => 'B',
            CellKind::Robot => 'R',
            CellKind::Goal => 'W',
        }
    }
}

impl TryFrom<char> for CellKind {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '.' => Ok(CellKind::Empty),
            'X' => Ok(CellKind::Obstacle),
            'B' => Ok(CellKind::Bonus),
            'R' => Ok(CellKind::Robot),
            'W' => Ok(CellKind::Goal),
            other => Err(Error::InvalidCharForMap(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn all_dirs() -> &'static [Direction] {
        static ALL_DIRECTIONS: [Direction; 4] = [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ];

        &ALL_DIRECTIONS
    }
}

/// Cell coordinates, `x` is the column and `y` the row counted from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbor in given direction, `None` when it would leave the first quadrant.
    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::Up if self.y > 0 => Some(Self::new(self.x, self.y - 1)),
            Direction::Right => Some(Self::new(self.x + 1, self.y)),
            Direction::Down => Some(Self::new(self.x, self.y + 1)),
            Direction::Left if self.x > 0 => Some(Self::new(self.x - 1, self.y)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellKind>,
    width: usize,
    height: usize,
    robot_pos: Position,
    goal_pos: Position,
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line = row
                .iter()
                .map(|kind| char::from(*kind).to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }

        Ok(())
    }
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = GridBuilder::new();
        for line in s.lines().map(str::trim).filter(|line| !line.is_empty()) {
            builder.add_row(line)?;
        }

        builder.build()
    }
}

impl Grid {
    /// Builds a grid from row-major cells, checking there's exactly one robot and one goal.
    pub fn from_cells(width: usize, height: usize, cells: Vec<CellKind>) -> Result<Self, Error> {
        let cell_n = cell_n(width, height)?;
        if cells.len() != cell_n {
            return Err(Error::InvalidCellCount(width, height, cells.len()));
        }

        let to_pos = |ind: usize| Position::new(ind % width, ind / width);
        let mut robot_pos = None;
        let mut goal_pos = None;
        for (ind, kind) in cells.iter().enumerate() {
            match kind {
                CellKind::Robot => {
                    if let Some(last_pos) = robot_pos.replace(to_pos(ind)) {
                        return Err(Error::MultipleRobots(last_pos, to_pos(ind)));
                    }
                }
                CellKind::Goal => {
                    if let Some(last_pos) = goal_pos.replace(to_pos(ind)) {
                        return Err(Error::MultipleGoals(last_pos, to_pos(ind)));
                    }
                }
                _ => (),
            }
        }

        Ok(Self {
            cells,
            width,
            height,
            robot_pos: robot_pos.ok_or(Error::NoRobotInMap)?,
            goal_pos: goal_pos.ok_or(Error::NoGoalInMap)?,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn robot_pos(&self) -> Position {
        self.robot_pos
    }

    pub fn goal_pos(&self) -> Position {
        self.goal_pos
    }

    pub fn cell_at(&self, pos: &Position) -> Result<CellKind, Error> {
        self.pos_to_ind(pos)
            .map(|ind| self.cells[ind])
            .ok_or(Error::OutOfBounds(*pos))
    }

    pub fn is_passable(&self, pos: &Position) -> bool {
        self.cell_at(pos)
            .is_ok_and(|kind| kind != CellKind::Obstacle)
    }

    /// Overwrites the kind of a cell, keeping one robot and one goal on the grid.
    ///
    /// Placing the robot moves it: its old cell turns back into the goal if it was
    /// standing there, otherwise it becomes empty. Obstacles, the robot cell and the
    /// goal cell can't be overwritten with anything else, and no second goal can be added.
    pub fn set_cell(&mut self, pos: &Position, kind: CellKind) -> Result<(), Error> {
        let ind = self.pos_to_ind(pos).ok_or(Error::OutOfBounds(*pos))?;
        let old_kind = self.cells[ind];
        if old_kind == kind {
            return Ok(());
        }
        let is_allowed = match kind {
            CellKind::Robot => old_kind != CellKind::Obstacle,
            CellKind::Goal | CellKind::Obstacle => false,
            CellKind::Empty | CellKind::Bonus => {
                old_kind != CellKind::Obstacle && *pos != self.robot_pos && *pos != self.goal_pos
            }
        };
        if !is_allowed {
            return Err(Error::InvalidCellUpdate(*pos, old_kind, kind));
        }

        if kind == CellKind::Robot {
            let old_robot_pos = self.robot_pos;
            let left_kind = if old_robot_pos == self.goal_pos {
                CellKind::Goal
            } else {
                CellKind::Empty
            };
            let old_robot_ind = self
                .pos_to_ind(&old_robot_pos)
                .ok_or(Error::OutOfBounds(old_robot_pos))?;
            self.cells[old_robot_ind] = left_kind;
            self.robot_pos = *pos;
        }
        self.cells[ind] = kind;

        Ok(())
    }

    pub fn is_inside(&self, pos: &Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn positions(&self, kind: CellKind) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, this_kind)| **this_kind == kind)
            .map(|(ind, _)| self.ind_to_pos(ind))
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|this_kind| **this_kind == kind).count()
    }

    fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if self.is_inside(pos) {
            Some(pos.y * self.width + pos.x)
        } else {
            None
        }
    }

    fn ind_to_pos(&self, ind: usize) -> Position {
        Position::new(ind % self.width, ind / self.width)
    }
}

pub struct GridBuilder {
    cells: Vec<CellKind>,
    row_n: usize,
    col_n: Option<usize>,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GridBuilder {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            row_n: 0,
            col_n: None,
        }
    }

    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        let this_col_n = text.chars().count();
        let expect_col_n = *self.col_n.get_or_insert(this_col_n);
        if expect_col_n != this_col_n {
            return Err(Error::InconsistentRow(expect_col_n, this_col_n));
        }

        for c in text.chars() {
            self.cells.push(CellKind::try_from(c)?);
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<Grid, Error> {
        match self.col_n {
            Some(col_n) if col_n > 0 => Grid::from_cells(col_n, self.row_n, self.cells),
            _ => Err(Error::EmptyMap),
        }
    }
}

/// Cell count of a `width` x `height` grid, each side must be in `1..=MAX_SIDE_LEN`.
pub(crate) fn cell_n(width: usize, height: usize) -> Result<usize, Error> {
    let side_range = 1..=MAX_SIDE_LEN;
    if !side_range.contains(&width) || !side_range.contains(&height) {
        return Err(Error::InvalidDimensions(width, height));
    }

    width
        .checked_mul(height)
        .ok_or(Error::InvalidDimensions(width, height))
}
