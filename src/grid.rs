use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use grid_util::{SimpleValueGrid, ValueGrid};
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::ParseGridError;
use crate::DEFAULT_GRID_SIZE;

/// State of a single cell. Exactly one status applies at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellStatus {
    #[default]
    Unvisited,
    Start,
    End,
    Barrier,
    /// Discovered and waiting in the frontier.
    Open,
    /// Expanded, its cost from the start is final.
    Closed,
    /// Part of the reconstructed path.
    Path,
}

impl CellStatus {
    pub fn is_barrier(self) -> bool {
        self == CellStatus::Barrier
    }
    /// Statuses written by a search rather than by the user.
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellStatus::Open | CellStatus::Closed | CellStatus::Path)
    }
    /// Single character used by the text layout of a [CellGrid].
    pub fn symbol(self) -> char {
        match self {
            CellStatus::Unvisited => '.',
            CellStatus::Start => 'S',
            CellStatus::End => 'E',
            CellStatus::Barrier => '#',
            CellStatus::Open => 'o',
            CellStatus::Closed => 'x',
            CellStatus::Path => '*',
        }
    }
    pub fn from_symbol(symbol: char) -> Option<CellStatus> {
        Some(match symbol {
            '.' => CellStatus::Unvisited,
            'S' => CellStatus::Start,
            'E' => CellStatus::End,
            '#' => CellStatus::Barrier,
            'o' => CellStatus::Open,
            'x' => CellStatus::Closed,
            '*' => CellStatus::Path,
            _ => return None,
        })
    }
}

/// The four axis-aligned moves, in the order neighbour lists are built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    /// Column and row delta of the move.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
        }
    }
    pub fn step(self, point: Point) -> Point {
        let (dx, dy) = self.offset();
        Point::new(point.x + dx, point.y + dy)
    }
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// [CellGrid] owns the N×N cells of the board. Next to the [CellStatus] of every cell it caches
/// the open neighbours of each cell as a [u8] [Direction] mask, and the connected components of
/// the non-barrier cells in a [UnionFind] structure.
///
/// Neighbour lists are not maintained automatically: call
/// [recompute_neighbours](Self::recompute_neighbours) after editing barriers and before searching.
#[derive(Clone, Debug)]
pub struct CellGrid {
    cells: SimpleValueGrid<CellStatus>,
    neighbours: SimpleValueGrid<u8>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Default for CellGrid {
    fn default() -> CellGrid {
        CellGrid::new(DEFAULT_GRID_SIZE)
    }
}

impl CellGrid {
    /// Creates an `n`×`n` grid of unvisited cells without any neighbour links.
    pub fn new(n: usize) -> CellGrid {
        CellGrid {
            cells: SimpleValueGrid::new(n, n, CellStatus::Unvisited),
            neighbours: SimpleValueGrid::new(n, n, 0),
            components: UnionFind::new(n * n),
            components_dirty: true,
        }
    }

    /// Number of rows, which equals the number of columns.
    pub fn size(&self) -> usize {
        self.cells.height()
    }
    pub fn in_bounds(&self, point: Point) -> bool {
        self.cells.point_in_bounds(point)
    }
    pub fn status(&self, point: Point) -> CellStatus {
        debug_assert!(self.in_bounds(point), "{point} is out of bounds");
        self.cells.get_point(point)
    }
    /// Overwrites the status of a cell. No transition is refused; keeping a single start and end
    /// is up to the caller.
    pub fn set_status(&mut self, point: Point, status: CellStatus) {
        if self.status(point).is_barrier() != status.is_barrier() {
            self.components_dirty = true;
        }
        self.cells.set_point(point, status);
    }
    pub fn reset_cell(&mut self, point: Point) {
        self.set_status(point, CellStatus::Unvisited);
    }
    /// Sets every cell back to [CellStatus::Unvisited].
    pub fn reset(&mut self) {
        let n = self.size();
        self.cells = SimpleValueGrid::new(n, n, CellStatus::Unvisited);
        self.components_dirty = true;
    }
    /// Erases Open, Closed and Path marks left by an earlier search.
    pub fn clear_search_marks(&mut self) {
        for (point, status) in self.cells().collect::<Vec<_>>() {
            if status.is_search_mark() {
                self.cells.set_point(point, CellStatus::Unvisited);
            }
        }
    }

    /// All cells with their status in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Point, CellStatus)> + '_ {
        let n = self.size() as i32;
        iproduct!(0..n, 0..n).map(move |(y, x)| {
            let point = Point::new(x, y);
            (point, self.cells.get_point(point))
        })
    }
    /// First cell in row-major order with the given status.
    pub fn find(&self, status: CellStatus) -> Option<Point> {
        self.cells()
            .find(|&(_, s)| s == status)
            .map(|(point, _)| point)
    }
    pub fn count(&self, status: CellStatus) -> usize {
        self.cells().filter(|&(_, s)| s == status).count()
    }

    /// The neighbours recorded by the last [recompute_neighbours](Self::recompute_neighbours),
    /// ordered down, up, right, left.
    pub fn neighbours(&self, point: Point) -> SmallVec<[Point; 4]> {
        let mask = self.neighbours.get_point(point);
        Direction::ALL
            .into_iter()
            .filter(|dir| mask & dir.bit() != 0)
            .map(|dir| dir.step(point))
            .collect()
    }
    /// Rebuilds the neighbour list of every cell from the four adjacent positions, skipping those
    /// outside the grid and those that are currently barriers.
    pub fn recompute_neighbours(&mut self) {
        let n = self.size() as i32;
        for (x, y) in iproduct!(0..n, 0..n) {
            let point = Point::new(x, y);
            let mask = Direction::ALL
                .into_iter()
                .filter(|dir| {
                    let next = dir.step(point);
                    self.in_bounds(next) && !self.cells.get_point(next).is_barrier()
                })
                .fold(0u8, |mask, dir| mask | dir.bit());
            self.neighbours.set_point(point, mask);
        }
    }

    /// Regenerates the components if a barrier has been added or removed since they were built.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up 4-connected open cells.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components for {0}x{0} grid", self.size());
        let n = self.size() as i32;
        self.components = UnionFind::new(self.cells.width() * self.cells.height());
        self.components_dirty = false;
        for (x, y) in iproduct!(0..n, 0..n) {
            let point = Point::new(x, y);
            if self.cells.get_point(point).is_barrier() {
                continue;
            }
            let ix = self.cells.get_ix_point(&point);
            for dir in [Direction::Down, Direction::Right] {
                let next = dir.step(point);
                if self.in_bounds(next) && !self.cells.get_point(next).is_barrier() {
                    let next_ix = self.cells.get_ix_point(&next);
                    self.components.union(ix, next_ix);
                }
            }
        }
    }
    /// Checks whether `start` and `goal` are in the same component. Expects the components to be
    /// current, see [update](Self::update).
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        debug_assert!(!self.components_dirty, "components are out of date");
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            let start_ix = self.cells.get_ix_point(start);
            let goal_ix = self.cells.get_ix_point(goal);
            self.components.equiv(start_ix, goal_ix)
        } else {
            false
        }
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let n = self.size() as i32;
        for y in 0..n {
            let row = (0..n)
                .map(|x| self.cells.get(x, y).symbol())
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Parses the layout written by [Display], one line per row. Blank lines and surrounding
/// whitespace are ignored. The parsed grid has its neighbours and components computed.
impl FromStr for CellGrid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>();
        if rows.is_empty() {
            return Err(ParseGridError::Empty);
        }
        let n = rows.len();
        let mut grid = CellGrid::new(n);
        let (mut has_start, mut has_end) = (false, false);
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != n {
                return Err(ParseGridError::NotSquare {
                    row,
                    expected: n,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let status = CellStatus::from_symbol(symbol)
                    .ok_or(ParseGridError::UnknownSymbol { symbol, row, col })?;
                match status {
                    CellStatus::Start if has_start => return Err(ParseGridError::DuplicateStart),
                    CellStatus::End if has_end => return Err(ParseGridError::DuplicateEnd),
                    CellStatus::Start => has_start = true,
                    CellStatus::End => has_end = true,
                    _ => {}
                }
                grid.set_status(Point::new(col as i32, row as i32), status);
            }
        }
        grid.recompute_neighbours();
        grid.generate_components();
        Ok(grid)
    }
}
