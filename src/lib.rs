//! # astar_visualizer
//!
//! The search core of an interactive grid pathfinding visualizer. A user paints a start cell,
//! an end cell and barriers on an N×N grid, after which an
//! [A* search](https://en.wikipedia.org/wiki/A*_search_algorithm) runs over the
//! 4-connected, uniform-cost grid. The search is an explicit state machine: every expanded cell
//! and every revealed path cell is reported to a [SearchObserver], which is where a UI redraws.
//!
//! Rendering is left to the embedding program. Cell state is an explicit [CellStatus]; mapping
//! it to colours happens at the UI boundary only.
//!
//! Positions are [Point]s with `x` the column and `y` the row.
pub mod editor;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod solver;

pub use editor::{EditEvent, GridEditor};
pub use error::{InvalidInvocation, ParseGridError};
pub use frontier::Frontier;
pub use grid::{CellGrid, CellStatus, Direction};
pub use grid_util::point::Point;
pub use solver::astar::AstarSearch;
pub use solver::{AbortFlag, NoopObserver, SearchObserver, SearchOutcome, SearchStatus, StepEvent};

use std::time::Duration;

/// Grid size used by the [Default] implementations, matching a 10×10 board.
pub const DEFAULT_GRID_SIZE: usize = 10;
/// Suggested pause between revealed path cells. Pacing is up to the UI, the search never sleeps.
pub const PATH_REVEAL_DELAY: Duration = Duration::from_millis(50);
/// Cost of every move between adjacent cells.
pub const UNIT_COST: u32 = 1;

/// Manhattan distance between two cells, admissible and consistent on a 4-connected unit-cost
/// grid.
pub fn heuristic(p1: &Point, p2: &Point) -> u32 {
    p1.manhattan_distance(p2) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_is_symmetric_manhattan() {
        let a = Point::new(1, 4);
        let b = Point::new(3, 0);
        assert_eq!(heuristic(&a, &b), 6);
        assert_eq!(heuristic(&b, &a), 6);
        assert_eq!(heuristic(&a, &a), 0);
    }
}
