use std::fmt::Display;

use crate::{
    executor::{execute_path, move_robot, GridObserver},
    grid::{Grid, Position},
    input::{Command, InputSource},
    pathfind::Pathfinder,
    Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    ReachedGoal { score: u32, steps: usize },
    NoPath { score: u32, start: Position, goal: Position },
    Quit { score: u32 },
}

impl Outcome {
    pub fn score(&self) -> u32 {
        match self {
            Outcome::ReachedGoal { score, .. }
            | Outcome::NoPath { score, .. }
            | Outcome::Quit { score } => *score,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::ReachedGoal { score, .. } => {
                write!(f, "Reached the goal! Final score: {}", score)
            }
            Outcome::NoPath { score, start, goal } => write!(
                f,
                "No path from {} to {}. Final score: {}",
                start, goal, score
            ),
            Outcome::Quit { score } => write!(f, "Game aborted. Final score: {}", score),
        }
    }
}

/// One round: the grid being played on and the score collected so far.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    score: u32,
}

impl Game {
    pub fn new(grid: Grid) -> Self {
        Self { grid, score: 0 }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.grid.robot_pos() == self.grid.goal_pos()
    }

    /// Moves the robot by commands from `input` until it reaches the goal or the player quits.
    pub fn play_manual<I, O>(&mut self, input: &mut I, observer: &mut O) -> Result<Outcome, Error>
    where
        I: InputSource,
        O: GridObserver,
    {
        let outcome = self.run_manual(input, observer)?;
        observer.finish(&self.grid, &outcome)?;
        Ok(outcome)
    }

    /// Lets the robot follow the shortest path to the goal, if there's one.
    pub fn play_automatic<O: GridObserver>(
        &mut self,
        pathfinder: &Pathfinder,
        observer: &mut O,
    ) -> Result<Outcome, Error> {
        let outcome = self.run_automatic(pathfinder, observer)?;
        observer.finish(&self.grid, &outcome)?;
        Ok(outcome)
    }

    fn run_manual<I, O>(&mut self, input: &mut I, observer: &mut O) -> Result<Outcome, Error>
    where
        I: InputSource,
        O: GridObserver,
    {
        observer.observe(&self.grid, self.score)?;
        let mut steps = 0;
        while !self.is_finished() {
            let dir = match input.next_command()? {
                Command::Move(dir) => dir,
                Command::Quit => return Ok(Outcome::Quit { score: self.score }),
            };

            let robot_pos = self.grid.robot_pos();
            let Some(dest) = robot_pos.neighbor(dir) else {
                log::debug!("Ignored move {:?} from {}, it leaves the grid.", dir, robot_pos);
                continue;
            };
            match move_robot(&mut self.grid, &dest, &mut self.score) {
                Ok(()) => {
                    steps += 1;
                    observer.observe(&self.grid, self.score)?;
                }
                Err(Error::InvalidMove(from, to)) => {
                    log::debug!("Ignored move from {} to {}.", from, to);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Outcome::ReachedGoal {
            score: self.score,
            steps,
        })
    }

    fn run_automatic<O: GridObserver>(
        &mut self,
        pathfinder: &Pathfinder,
        observer: &mut O,
    ) -> Result<Outcome, Error> {
        observer.observe(&self.grid, self.score)?;
        let start = self.grid.robot_pos();
        let goal = self.grid.goal_pos();
        let path = match pathfinder.find_path(&self.grid, &start, &goal) {
            Ok(path) => path,
            Err(Error::NoPathFound(start, goal)) => {
                log::info!("Robot can't reach goal {} from {}.", goal, start);
                return Ok(Outcome::NoPath {
                    score: self.score,
                    start,
                    goal,
                });
            }
            Err(e) => return Err(e),
        };

        log::info!("Following path of {} step(s) to {}.", path.cost(), goal);
        self.score = execute_path(&mut self.grid, &path, self.score, observer)?;
        Ok(Outcome::ReachedGoal {
            score: self.score,
            steps: path.len() - 1,
        })
    }
}
