use grid_util::point::Point;
use log::debug;

use crate::grid::{CellGrid, CellStatus};
use crate::solver::{FxIndexMap, SearchObserver, StepEvent};

/// Follows the predecessor chain from `goal` until a cell without predecessor, which is the
/// start. Every cell on the way except the start is marked [CellStatus::Path] and reported to the
/// observer as it is reached, so a UI can animate the reveal.
///
/// Returns the cells from `goal` back to `start`, both included.
pub fn reconstruct_path<O>(
    came_from: &FxIndexMap<Point, Point>,
    start: Point,
    goal: Point,
    grid: &mut CellGrid,
    observer: &mut O,
) -> Vec<Point>
where
    O: SearchObserver + ?Sized,
{
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        current = previous;
        path.push(current);
        if current != start {
            grid.set_status(current, CellStatus::Path);
            observer.on_step(grid, StepEvent::PathRevealed(current));
        }
    }
    debug_assert_eq!(current, start, "predecessor chain does not end at the start");
    debug!("Reconstructed path with {} cells", path.len());
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_back_to_start() {
        let mut grid = CellGrid::new(3);
        let chain = [(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)].map(|(x, y)| Point::new(x, y));
        let mut came_from = FxIndexMap::default();
        for pair in chain.windows(2) {
            came_from.insert(pair[1], pair[0]);
        }
        let mut revealed = Vec::new();
        let path = reconstruct_path(
            &came_from,
            chain[0],
            chain[4],
            &mut grid,
            &mut |g: &CellGrid, event: StepEvent| {
                if let StepEvent::PathRevealed(p) = event {
                    assert_eq!(g.status(p), CellStatus::Path);
                    revealed.push(p);
                }
            },
        );
        assert_eq!(path, chain.iter().rev().copied().collect::<Vec<_>>());
        assert_eq!(revealed, vec![chain[3], chain[2], chain[1]]);
        assert_eq!(grid.count(CellStatus::Path), 3);
        assert_eq!(grid.status(chain[0]), CellStatus::Unvisited);
        assert_eq!(grid.status(chain[4]), CellStatus::Unvisited);
    }

    #[test]
    fn goal_without_predecessor() {
        let mut grid = CellGrid::new(2);
        let goal = Point::new(1, 1);
        let mut calls = 0;
        let path = reconstruct_path(
            &FxIndexMap::default(),
            goal,
            goal,
            &mut grid,
            &mut |_: &CellGrid, _: StepEvent| calls += 1,
        );
        assert_eq!(path, vec![goal]);
        assert_eq!(calls, 0);
    }
}
