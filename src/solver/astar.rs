use fxhash::FxHashMap;
use grid_util::point::Point;
use log::{info, trace, warn};

use crate::error::InvalidInvocation;
use crate::frontier::Frontier;
use crate::grid::{CellGrid, CellStatus};
use crate::solver::reconstruct::reconstruct_path;
use crate::solver::{
    AbortFlag, FxIndexMap, SearchObserver, SearchOutcome, SearchStatus, StepEvent,
};
use crate::{heuristic, UNIT_COST};

/// One A* search from a start cell to an end cell, driven one iteration at a time.
///
/// The search does not hold on to the grid: every [step](Self::step) borrows it, so the owner
/// can render between iterations. The grid's neighbour lists must be current when the search is
/// created and barriers must not change while it is running.
///
/// ```
/// use astar_visualizer::{AstarSearch, CellGrid, NoopObserver, Point, SearchOutcome};
///
/// let mut grid = CellGrid::new(5);
/// grid.recompute_neighbours();
/// let mut search = AstarSearch::new(&grid, Point::new(0, 0), Point::new(4, 0)).unwrap();
/// assert_eq!(search.run(&mut grid, &mut NoopObserver), SearchOutcome::PathFound(4));
/// ```
#[derive(Debug)]
pub struct AstarSearch {
    start: Point,
    end: Point,
    frontier: Frontier<Point>,
    g_score: FxHashMap<Point, u32>,
    f_score: FxHashMap<Point, u32>,
    came_from: FxIndexMap<Point, Point>,
    status: SearchStatus,
    path: Vec<Point>,
    expanded: usize,
    abort: AbortFlag,
}

impl AstarSearch {
    /// Validates the endpoints and seeds the frontier with the start cell.
    pub fn new(
        grid: &CellGrid,
        start: Point,
        end: Point,
    ) -> Result<AstarSearch, InvalidInvocation> {
        for point in [start, end] {
            if !grid.in_bounds(point) {
                warn!("Refusing to search: {} lies outside the grid", point);
                return Err(InvalidInvocation::OutOfBounds(point));
            }
            if grid.status(point).is_barrier() {
                warn!("Refusing to search: endpoint {} is a barrier", point);
                return Err(InvalidInvocation::BarrierEndpoint(point));
            }
        }
        let estimate = heuristic(&start, &end);
        let mut frontier = Frontier::new();
        frontier.push(estimate, start);
        let mut g_score = FxHashMap::default();
        g_score.insert(start, 0);
        let mut f_score = FxHashMap::default();
        f_score.insert(start, estimate);
        info!("Searching for a path from {} to {}", start, end);
        Ok(AstarSearch {
            start,
            end,
            frontier,
            g_score,
            f_score,
            came_from: FxIndexMap::default(),
            status: SearchStatus::Running,
            path: Vec::new(),
            expanded: 0,
            abort: AbortFlag::new(),
        })
    }

    /// Replaces the search's own abort flag with a shared one.
    pub fn with_abort_flag(mut self, abort: AbortFlag) -> AstarSearch {
        self.abort = abort;
        self
    }
    pub fn abort_flag(&self) -> AbortFlag {
        self.abort.clone()
    }

    pub fn start(&self) -> Point {
        self.start
    }
    pub fn end(&self) -> Point {
        self.end
    }
    pub fn status(&self) -> SearchStatus {
        self.status
    }
    /// Number of cells popped from the frontier so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }
    /// Best known cost from the start, [None] while the cell is undiscovered.
    pub fn g_score(&self, point: &Point) -> Option<u32> {
        self.g_score.get(point).copied()
    }
    pub fn f_score(&self, point: &Point) -> Option<u32> {
        self.f_score.get(point).copied()
    }
    pub fn came_from(&self, point: &Point) -> Option<Point> {
        self.came_from.get(point).copied()
    }
    pub fn in_frontier(&self, point: &Point) -> bool {
        self.frontier.contains(point)
    }
    /// The path found, from the end back to the start with both included. Empty unless the
    /// search succeeded.
    pub fn path(&self) -> &[Point] {
        &self.path
    }
    pub fn path_from_start(&self) -> Vec<Point> {
        self.path.iter().rev().copied().collect()
    }

    /// The outcome once the search has left [SearchStatus::Running].
    pub fn outcome(&self) -> Option<SearchOutcome> {
        match self.status {
            SearchStatus::Running => None,
            SearchStatus::Succeeded => Some(SearchOutcome::PathFound(self.path.len() - 1)),
            SearchStatus::Failed => Some(SearchOutcome::NoPathExists),
            SearchStatus::Aborted => Some(SearchOutcome::Aborted),
        }
    }

    /// Steps until the search leaves [SearchStatus::Running].
    pub fn run<O>(&mut self, grid: &mut CellGrid, observer: &mut O) -> SearchOutcome
    where
        O: SearchObserver + ?Sized,
    {
        loop {
            self.step(grid, observer);
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
        }
    }

    /// Performs one iteration: pops the cheapest frontier cell and either finishes on the goal
    /// or relaxes its neighbours, notifies the observer and closes the cell.
    pub fn step<O>(&mut self, grid: &mut CellGrid, observer: &mut O) -> SearchStatus
    where
        O: SearchObserver + ?Sized,
    {
        if !self.status.is_running() {
            return self.status;
        }
        if self.abort.is_aborted() {
            return self.finish(grid, SearchStatus::Aborted);
        }
        let Some(current) = self.frontier.pop_min() else {
            return self.finish(grid, SearchStatus::Failed);
        };
        self.expanded += 1;
        if current == self.end {
            self.path = reconstruct_path(&self.came_from, self.start, self.end, grid, observer);
            return self.finish(grid, SearchStatus::Succeeded);
        }

        let current_g = self.g_cost(&current);
        for neighbour in grid.neighbours(current) {
            let tentative_g = current_g.saturating_add(UNIT_COST);
            if tentative_g >= self.g_cost(&neighbour) {
                continue;
            }
            let f = tentative_g + heuristic(&neighbour, &self.end);
            self.came_from.insert(neighbour, current);
            self.g_score.insert(neighbour, tentative_g);
            self.f_score.insert(neighbour, f);
            if self.frontier.contains(&neighbour) {
                self.frontier.decrease_priority(f, &neighbour);
            } else {
                self.frontier.push(f, neighbour);
                grid.set_status(neighbour, CellStatus::Open);
            }
        }
        trace!(
            "Expanded {} (g = {}), {} cells in frontier",
            current,
            current_g,
            self.frontier.len()
        );
        observer.on_step(grid, StepEvent::Expanded(current));
        if current != self.start {
            grid.set_status(current, CellStatus::Closed);
        }
        if self.frontier.is_empty() {
            return self.finish(grid, SearchStatus::Failed);
        }
        SearchStatus::Running
    }

    fn g_cost(&self, point: &Point) -> u32 {
        self.g_score.get(point).copied().unwrap_or(u32::MAX)
    }

    fn finish(&mut self, grid: &mut CellGrid, status: SearchStatus) -> SearchStatus {
        self.status = status;
        grid.set_status(self.end, CellStatus::End);
        grid.set_status(self.start, CellStatus::Start);
        match status {
            SearchStatus::Succeeded => info!(
                "Found path of length {} from {} to {} after expanding {} cells",
                self.path.len() - 1,
                self.start,
                self.end,
                self.expanded
            ),
            SearchStatus::Failed => info!(
                "{} is not reachable from {}, expanded {} cells",
                self.end, self.start, self.expanded
            ),
            SearchStatus::Aborted => {
                info!("Search aborted after expanding {} cells", self.expanded)
            }
            SearchStatus::Running => {}
        }
        status
    }
}
