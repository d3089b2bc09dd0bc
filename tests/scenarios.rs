use itertools::iproduct;

use astar_visualizer::{
    heuristic, AstarSearch, CellGrid, CellStatus, InvalidInvocation, NoopObserver, Point,
    SearchOutcome, StepEvent,
};

/// Runs a search between the `S` and `E` cells of a layout and records every observer call.
fn solve(layout: &str) -> (CellGrid, AstarSearch, SearchOutcome, Vec<StepEvent>) {
    let mut grid: CellGrid = layout.parse().unwrap();
    let start = grid.find(CellStatus::Start).unwrap();
    let end = grid.find(CellStatus::End).unwrap();
    let mut search = AstarSearch::new(&grid, start, end).unwrap();
    let mut events = Vec::new();
    let outcome = search.run(&mut grid, &mut |_: &CellGrid, e: StepEvent| events.push(e));
    (grid, search, outcome, events)
}

fn revealed(events: &[StepEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, StepEvent::PathRevealed(_)))
        .count()
}

#[test]
fn straight_line_on_empty_grid() {
    let (grid, search, outcome, events) = solve(
        "
        S...E
        .....
        .....
        .....
        .....
        ",
    );
    assert_eq!(outcome, SearchOutcome::PathFound(4));
    assert!(search.path().iter().all(|p| p.y == 0));
    assert_eq!(
        search.path_from_start(),
        (0..5).map(|x| Point::new(x, 0)).collect::<Vec<_>>()
    );
    assert_eq!(revealed(&events), 3);
    assert_eq!(grid.to_string().lines().next(), Some("S***E"));
}

/// A wall down column 2 with only the bottom row open forces the path through (row 4, col 2).
#[test]
fn forced_detour_through_gap() {
    let (_, search, outcome, _) = solve(
        "
        S.#..
        ..#..
        ..#..
        ..#..
        ....E
        ",
    );
    assert_eq!(outcome, SearchOutcome::PathFound(8));
    assert!(search.path().contains(&Point::new(2, 4)));
    assert_eq!(search.g_score(&Point::new(4, 4)), Some(8));
}

/// Same wall with the end on the top row: the detour costs eight extra moves.
#[test]
fn detour_back_up() {
    let (_, search, outcome, _) = solve(
        "
        S.#.E
        ..#..
        ..#..
        ..#..
        .....
        ",
    );
    assert_eq!(outcome, SearchOutcome::PathFound(12));
    assert!(search.path().contains(&Point::new(2, 4)));
}

#[test]
fn degenerate_start_equals_end() {
    let mut grid = CellGrid::new(3);
    grid.recompute_neighbours();
    let centre = Point::new(1, 1);
    let mut search = AstarSearch::new(&grid, centre, centre).unwrap();
    let mut events = Vec::new();
    let outcome = search.run(&mut grid, &mut |_: &CellGrid, e: StepEvent| events.push(e));
    assert_eq!(outcome, SearchOutcome::PathFound(0));
    assert_eq!(revealed(&events), 0);
    assert_eq!(grid.count(CellStatus::Path), 0);
}

#[test]
fn walled_in_start() {
    let (grid, _, outcome, events) = solve(
        "
        .#.
        #S#
        .#E
        ",
    );
    assert_eq!(outcome, SearchOutcome::NoPathExists);
    assert_eq!(events, vec![StepEvent::Expanded(Point::new(1, 1))]);
    assert_eq!(grid.count(CellStatus::Path), 0);
}

#[test]
fn walled_in_corner_start() {
    let (_, _, outcome, _) = solve(
        "
        S#...
        #....
        .....
        .....
        ....E
        ",
    );
    assert_eq!(outcome, SearchOutcome::NoPathExists);
}

/// Without barriers every pair of cells is joined by a path as long as their Manhattan distance.
#[test]
fn open_grid_lengths_are_manhattan() {
    const N: i32 = 6;
    for (sx, sy, ex, ey) in iproduct!(0..N, 0..N, 0..N, 0..N) {
        let mut grid = CellGrid::new(N as usize);
        grid.recompute_neighbours();
        let start = Point::new(sx, sy);
        let end = Point::new(ex, ey);
        let mut search = AstarSearch::new(&grid, start, end).unwrap();
        let outcome = search.run(&mut grid, &mut NoopObserver);
        assert_eq!(
            outcome,
            SearchOutcome::PathFound(heuristic(&start, &end) as usize)
        );
    }
}

/// One redraw per expanded cell before the goal, one per revealed path cell.
#[test]
fn observer_call_counts() {
    let (_, search, outcome, events) = solve(
        "
        S....
        .###.
        ...#.
        .#...
        ...#E
        ",
    );
    let length = outcome.path_length().unwrap();
    let expanded = events
        .iter()
        .filter(|e| matches!(e, StepEvent::Expanded(_)))
        .count();
    assert_eq!(expanded, search.expanded() - 1);
    assert_eq!(revealed(&events), length - 1);
    assert_eq!(search.path().len(), length + 1);
    assert_eq!(search.g_score(&search.end()), Some(length as u32));
}

/// Every expanded cell except the start ends up closed or on the path.
#[test]
fn expanded_cells_are_closed() {
    let (grid, _, _, events) = solve(
        "
        S.....
        .####.
        ......
        .####.
        ......
        .....E
        ",
    );
    for event in events {
        if let StepEvent::Expanded(p) = event {
            let status = grid.status(p);
            assert!(
                matches!(
                    status,
                    CellStatus::Start | CellStatus::Closed | CellStatus::Path
                ),
                "{p} is {status:?}"
            );
        }
    }
}

#[test]
fn barrier_endpoint_is_rejected() {
    let grid: CellGrid = "S.\n.#".parse().unwrap();
    let error = AstarSearch::new(&grid, Point::new(0, 0), Point::new(1, 1)).unwrap_err();
    assert_eq!(error, InvalidInvocation::BarrierEndpoint(Point::new(1, 1)));
    assert!(error.to_string().ends_with("is a barrier"));
}
