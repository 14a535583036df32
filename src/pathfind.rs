use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, Ordering as AtomicOrdering},
        Arc,
    },
    time::{Duration, Instant},
};

use crate::{
    cost::{heuristic, step_cost},
    grid::{Direction, Grid, Position},
    Error,
};

/// Flag shared with whoever may want to stop a running search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Acquire)
    }
}

/// Positions from start to goal, both included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    positions: Vec<Position>,
}

impl From<Vec<Position>> for Path {
    fn from(positions: Vec<Position>) -> Self {
        Self { positions }
    }
}

impl Path {
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn start(&self) -> Option<&Position> {
        self.positions.first()
    }

    pub fn goal(&self) -> Option<&Position> {
        self.positions.last()
    }

    pub fn cost(&self) -> usize {
        self.positions
            .windows(2)
            .map(|pair| step_cost(&pair[0], &pair[1]))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter()
    }
}

#[derive(Debug)]
struct SearchNode {
    pos: Position,
    g: usize,
    parent: Option<usize>,
}

// Min-heap entry: lower f first, then lower h, then the earlier push.
// Node indices grow with every push so they double as insertion order.
#[derive(Debug, PartialEq, Eq)]
struct FrontierEntry {
    f: usize,
    h: usize,
    node_ind: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.node_ind.cmp(&self.node_ind))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search over a [`Grid`], optionally bounded by a cancel token or a timeout.
#[derive(Debug, Clone, Default)]
pub struct Pathfinder {
    cancel_token: Option<CancelToken>,
    timeout: Option<Duration>,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel_token = Some(token);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn find_path(&self, grid: &Grid, start: &Position, goal: &Position) -> Result<Path, Error> {
        for pos in [start, goal] {
            if !grid.is_inside(pos) {
                return Err(Error::OutOfBounds(*pos));
            }
        }

        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let mut nodes = vec![SearchNode {
            pos: *start,
            g: 0,
            parent: None,
        }];
        let start_h = heuristic(start, goal);
        let mut frontier = BinaryHeap::from([FrontierEntry {
            f: start_h,
            h: start_h,
            node_ind: 0,
        }]);
        let mut best_g = HashMap::from([(*start, 0)]);
        let mut closed = HashSet::new();
        while let Some(entry) = frontier.pop() {
            if self.should_stop(deadline) {
                log::debug!("Search from {} to {} cancelled.", start, goal);
                return Err(Error::Cancelled);
            }

            let cur_pos = nodes[entry.node_ind].pos;
            if !closed.insert(cur_pos) {
                continue;
            }

            if cur_pos == *goal {
                let path = Self::reconstruct(&nodes, entry.node_ind);
                log::debug!(
                    "Found path from {} to {} with {} step(s), expanded {} position(s).",
                    start,
                    goal,
                    path.len() - 1,
                    closed.len()
                );
                return Ok(path);
            }

            let cur_g = nodes[entry.node_ind].g;
            for next_pos in Direction::all_dirs()
                .iter()
                .flat_map(|dir| cur_pos.neighbor(*dir))
                .filter(|pos| grid.is_passable(pos) && !closed.contains(pos))
            {
                let next_g = cur_g + step_cost(&cur_pos, &next_pos);
                if best_g.get(&next_pos).is_some_and(|g| *g <= next_g) {
                    continue;
                }

                best_g.insert(next_pos, next_g);
                let h = heuristic(&next_pos, goal);
                nodes.push(SearchNode {
                    pos: next_pos,
                    g: next_g,
                    parent: Some(entry.node_ind),
                });
                frontier.push(FrontierEntry {
                    f: next_g + h,
                    h,
                    node_ind: nodes.len() - 1,
                });
            }
        }

        log::debug!(
            "No path from {} to {}, expanded {} position(s).",
            start,
            goal,
            closed.len()
        );
        Err(Error::NoPathFound(*start, *goal))
    }

    fn should_stop(&self, deadline: Option<Instant>) -> bool {
        self.cancel_token
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
            || deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    fn reconstruct(nodes: &[SearchNode], goal_ind: usize) -> Path {
        let mut positions = Vec::new();
        let mut cur_ind = Some(goal_ind);
        while let Some(ind) = cur_ind {
            positions.push(nodes[ind].pos);
            cur_ind = nodes[ind].parent;
        }
        positions.reverse();

        Path { positions }
    }
}

/// Searches with a default [`Pathfinder`], no cancellation.
pub fn find_path(grid: &Grid, start: &Position, goal: &Position) -> Result<Path, Error> {
    Pathfinder::new().find_path(grid, start, goal)
}
