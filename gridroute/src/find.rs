use std::{cmp::Ordering, collections::BinaryHeap, rc::Rc};

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::distance::distance;
use crate::error::{Endpoint, Result, RouteError};
use crate::grid::{Cell, CellStorage, Grid, Kind};

/// One candidate route, ending in `cell`.
///
/// Paths are never changed once created. Extending a path creates a new one pointing back at it,
/// so all candidates form a tree rooted at the start and share their common prefix.
#[derive(Debug)]
pub struct SearchPath {
    pub cell: Cell,
    /// estimated remaining cost to the finish
    pub heuristic: f64,
    /// cost of the steps taken from the start to `cell`
    pub cost: f64,
    pub previous: Option<Rc<SearchPath>>,
}

impl SearchPath {
    /// The path consisting of only the start cell
    pub fn start(start: Cell, goal: Cell) -> Rc<Self> {
        Rc::new(Self {
            cell: start,
            heuristic: distance(start, goal),
            cost: 0.0,
            previous: None,
        })
    }

    /// Create a new path that continues this one with a step to `next`
    pub fn extend(self: &Rc<Self>, next: Cell, goal: Cell) -> Rc<Self> {
        Rc::new(Self {
            cell: next,
            heuristic: distance(next, goal),
            cost: self.cost + distance(self.cell, next),
            previous: Some(Rc::clone(self)),
        })
    }

    /// The value the frontier orders by
    pub fn priority(&self) -> f64 {
        self.cost + self.heuristic
    }

    /// Walk the cells of this path backwards, from `cell` to the start.
    /// Can be called any number of times.
    pub fn trail(&self) -> Trail<'_> {
        Trail { next: Some(self) }
    }

    /// The cells of this path in travel order, start first
    pub fn route(&self) -> Vec<Cell> {
        let mut path: Vec<Cell> = self.trail().collect();
        path.reverse();
        path
    }
}

/// Iterator over the cells of a [`SearchPath`], last cell first
pub struct Trail<'a> {
    next: Option<&'a SearchPath>,
}

impl<'a> Iterator for Trail<'a> {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.previous.as_deref();
        Some(current.cell)
    }
}

/// The objects that we store in the priority queue
#[derive(Debug)]
struct ToVisit {
    path: Rc<SearchPath>,
    // insertion order, older entries win ties
    seq: u64,
}

impl Ord for ToVisit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path
            .priority()
            .total_cmp(&other.path.priority())
            .then_with(|| self.seq.cmp(&other.seq))
            .reverse() // reverse for BinaryHeap to be a min-heap
    }
}

impl PartialOrd for ToVisit {
    fn partial_cmp(&self, other: &ToVisit) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ToVisit {
    fn eq(&self, other: &ToVisit) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ToVisit {}

/// Candidate paths waiting to be expanded, cheapest (cost + heuristic) first
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<ToVisit>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a candidate path.
    ///
    /// The first queued entry for the same cell that is at least as expensive as the candidate is
    /// dropped first. Cheaper entries for the cell are kept, and the candidate is inserted anyway.
    /// Returns whether an entry was dropped.
    pub fn push(&mut self, path: Rc<SearchPath>) -> bool {
        let dominated = self
            .heap
            .iter()
            .position(|e| e.path.cell == path.cell && e.path.cost >= path.cost);

        if let Some(index) = dominated {
            let mut entries = std::mem::take(&mut self.heap).into_vec();
            entries.swap_remove(index);
            self.heap = BinaryHeap::from(entries);
        }

        self.heap.push(ToVisit {
            path,
            seq: self.next_seq,
        });
        self.next_seq += 1;

        dominated.is_some()
    }

    /// Remove and return the entry with the lowest priority
    pub fn pop(&mut self) -> Option<Rc<SearchPath>> {
        self.heap.pop().map(|e| e.path)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PathResult {
    pub path: Vec<Cell>,
    pub start: Cell,
    pub goal: Cell,
    pub total_cost: f64,
}

impl PathResult {
    /// Sum of the step costs between consecutive cells of the path
    pub fn edge_cost(&self) -> f64 {
        self.path.windows(2).map(|w| distance(w[0], w[1])).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathFinderState {
    Computing,
    NoPathFound,
    PathFound(PathResult),
}

impl PathFinderState {
    pub fn is_done(&self) -> bool {
        !matches!(self, PathFinderState::Computing)
    }
}

/// Counters describing how much work a search did
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// entries whose neighbours were queued
    pub expanded: usize,
    /// entries dropped because their cell was already expanded at a lower or equal cost
    pub skipped: usize,
    /// candidates inserted into the frontier
    pub pushed: usize,
    /// queued entries replaced by a candidate at least as cheap
    pub pruned: usize,
}

/// Best-first search from the start cell to the finish cell of a grid, one expansion per step
#[derive(Debug)]
pub struct PathFinder<'g> {
    grid: &'g Grid,
    start: Cell,
    goal: Cell,
    frontier: Frontier,
    // lowest cost each cell has been expanded at
    expanded: CellStorage<Option<f64>>,
    state: PathFinderState,
    stats: SearchStats,
}

impl<'g> PathFinder<'g> {
    pub fn new(grid: &'g Grid) -> Result<Self> {
        let start = grid
            .find(Kind::Start)
            .ok_or(RouteError::MissingEndpoint(Endpoint::Start))?;
        let goal = grid
            .find(Kind::Finish)
            .ok_or(RouteError::MissingEndpoint(Endpoint::Finish))?;

        let mut frontier = Frontier::new();
        frontier.push(SearchPath::start(start, goal));

        Ok(Self {
            grid,
            start,
            goal,
            frontier,
            expanded: grid.create_storage(),
            state: PathFinderState::Computing,
            stats: SearchStats::default(),
        })
    }

    /// Run the search until it either finds the finish or runs out of candidates
    pub fn finish(mut self) -> (PathFinderState, SearchStats) {
        loop {
            match self.step() {
                PathFinderState::Computing => {}
                s => return (s, self.stats),
            }
        }
    }

    pub fn step(&mut self) -> PathFinderState {
        if self.state.is_done() {
            return self.state.clone();
        }

        let Some(current) = self.frontier.pop() else {
            warn!(
                "no path from {} to {} after {} expansions",
                self.start, self.goal, self.stats.expanded
            );
            self.state = PathFinderState::NoPathFound;
            return self.state.clone();
        };

        if current.cell == self.goal {
            info!("found goal: cost={}", current.cost);

            self.state = PathFinderState::PathFound(PathResult {
                path: current.route(),
                start: self.start,
                goal: self.goal,
                total_cost: current.cost,
            });
            return self.state.clone();
        }

        // a cell is only expanded again when reached more cheaply than before
        if let Some(best) = *self.expanded.get(current.cell) {
            if best <= current.cost {
                self.stats.skipped += 1;
                return self.state.clone();
            }
        }
        *self.expanded.get_mut(current.cell) = Some(current.cost);
        self.stats.expanded += 1;

        trace!(
            "expanding {} cost={} priority={}",
            current.cell,
            current.cost,
            current.priority()
        );

        for next in self.grid.neighbors(current.cell) {
            if !next.kind.is_traversable() {
                continue;
            }
            if self.frontier.push(current.extend(next, self.goal)) {
                self.stats.pruned += 1;
            }
            self.stats.pushed += 1;
        }

        self.state.clone()
    }

    pub fn state(&self) -> &PathFinderState {
        &self.state
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }
}

/// Find the cheapest route between the start and finish cells of the grid
pub fn find_path(grid: &Grid) -> Result<PathResult> {
    let (state, stats) = PathFinder::new(grid)?.finish();

    debug!(
        "search done: expanded={} skipped={} pushed={} pruned={}",
        stats.expanded, stats.skipped, stats.pushed, stats.pruned
    );

    match state {
        PathFinderState::PathFound(result) => Ok(result),
        _ => Err(RouteError::NoPath),
    }
}
