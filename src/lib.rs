use std::{
    error,
    fmt::Display,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

pub mod console;
pub mod cost;
pub mod display;
pub mod executor;
pub mod game;
pub mod grid;
pub mod input;
pub mod pathfind;
pub mod setup;

pub use executor::{execute_path, move_robot, GridObserver, BONUS_SCORE};
pub use game::{Game, Outcome};
pub use grid::{CellKind, Direction, Grid, GridBuilder, Position};
pub use pathfind::{CancelToken, Pathfinder};
pub use setup::{generate_grid, GridSettings};

#[derive(Debug)]
pub enum Error {
    OutOfBounds(Position),
    NoPathFound(Position, Position), // (start, goal)
    InvalidMove(Position, Position), // (robot position, requested destination)
    Cancelled,
    InconsistentRow(usize, usize),
    InvalidCharForMap(char),
    MultipleRobots(Position, Position),
    MultipleGoals(Position, Position),
    NoRobotInMap,
    NoGoalInMap,
    EmptyMap,
    InvalidCellCount(usize, usize, usize), // (width, height, given cell count)
    InvalidDimensions(usize, usize),
    InvalidCellUpdate(Position, CellKind, CellKind), // (position, current kind, requested kind)
    InvalidDensity(u32),
    NotEnoughRoom(usize, usize), // (cells needed, cells in grid)
    TerminalError(io::Error),
    NotEnoughTerminalSpace(u16, u16, u16, u16),
    InputClosed,
    InvalidInput(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::OutOfBounds(pos) => write!(f, "Position {} is outside of the grid.", pos),
            Error::NoPathFound(start, goal) => {
                write!(f, "No path from {} to {}.", start, goal)
            }
            Error::InvalidMove(from, to) => write!(
                f,
                "Robot can't move from {} to {}, expect an adjacent passable cell.",
                from, to
            ),
            Error::Cancelled => write!(f, "Path search was cancelled."),
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} column(s) in each row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::InvalidCharForMap(c) => write!(f, "Invalid character({}) for map.", c),
            Error::MultipleRobots(last_pos, pos) => write!(
                f,
                "Given two robots in map({}, {}), expect only one.",
                last_pos, pos
            ),
            Error::MultipleGoals(last_pos, pos) => write!(
                f,
                "Given two goals in map({}, {}), expect only one.",
                last_pos, pos
            ),
            Error::NoRobotInMap => write!(f, "No robot found in given map, expect one."),
            Error::NoGoalInMap => write!(f, "No goal found in given map, expect one."),
            Error::EmptyMap => write!(f, "Given map has no cell."),
            Error::InvalidCellCount(width, height, cell_n) => write!(
                f,
                "Expect {} cell(s) for a {} x {} grid, given {}.",
                width.saturating_mul(*height),
                width,
                height,
                cell_n
            ),
            Error::InvalidDimensions(width, height) => write!(
                f,
                "Invalid grid size({} x {}), expect 1 to {} cells on each side.",
                width,
                height,
                grid::MAX_SIDE_LEN
            ),
            Error::InvalidCellUpdate(pos, old_kind, kind) => write!(
                f,
                "Can't turn cell {} from '{}' into '{}'.",
                pos, old_kind, kind
            ),
            Error::InvalidDensity(density) => {
                write!(f, "Invalid density({}%), expect at most 100%.", density)
            }
            Error::NotEnoughRoom(needed, total) => write!(
                f,
                "Need {} cell(s) to place everything, but the grid only has {}.",
                needed, total
            ),
            Error::TerminalError(ioe) => {
                write!(f, "Failed to control terminal, get error({})", ioe)
            }
            Error::NotEnoughTerminalSpace(real_row_n, real_col_n, expect_row_n, expect_col_n) => {
                write!(
                    f,
                    "Terminal({} x {}) hasn't enough space to render, expect {} rows x {} columns",
                    real_row_n, real_col_n, expect_row_n, expect_col_n
                )
            }
            Error::InputClosed => write!(f, "Input was closed before an answer was given."),
            Error::InvalidInput(s) => write!(f, "Invalid input({}).", s),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Manual,
    Auto,
}

impl TryFrom<char> for Mode {
    type Error = Error;

    fn try_from(value: char) -> std::result::Result<Self, Self::Error> {
        match value.to_ascii_lowercase() {
            'm' => Ok(Mode::Manual),
            'a' => Ok(Mode::Auto),
            other => Err(Error::InvalidInput(other.to_string())),
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Steer a robot to the goal, or let A* do it.")]
pub struct CLIArgs {
    /// Grid width, prompted if missing
    #[arg(long)]
    pub width: Option<usize>,
    /// Grid height, prompted if missing
    #[arg(long)]
    pub height: Option<usize>,
    /// Obstacle density in percent, prompted if missing
    #[arg(long = "obstacles")]
    pub obstacle_density: Option<u32>,
    /// Bonus density in percent, prompted if missing
    #[arg(long = "bonuses")]
    pub bonus_density: Option<u32>,
    /// Load the grid from a map file instead of generating it
    #[arg(long = "map")]
    pub map_path: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,
    /// Seed for obstacle, bonus, robot and goal placement
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print snapshots as plain text and read manual moves as lines
    #[arg(long)]
    pub plain: bool,
    #[arg(long, default_value_t = 150)]
    pub step_delay_ms: u64,
    #[arg(long)]
    pub search_timeout_ms: Option<u64>,
    /// Play a single round
    #[arg(long)]
    pub once: bool,
}

pub fn read_grid<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut builder = GridBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} in given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        if line.is_empty() {
            break;
        }

        builder
            .add_row(line.trim_end())
            .with_context(|| format!("Failed to parse row {} of map.", ind + 1))?;
    }

    Ok(builder.build()?)
}
