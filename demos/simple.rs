use astar_visualizer::{CellGrid, CellStatus, GridEditor, Point, SearchOutcome, StepEvent};

// In this example a path is found on a 5x5 grid with shape
//  _____
// |S #  |
// |  #  |
// |  #  |
// |  #  |
// |    E|
//  _____
// where
// - # marks a barrier
// - S marks the start
// - E marks the end
//
// The wall leaves only the bottom row open, so the path has to pass through it.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut editor = GridEditor::new(5);
    editor.paint(Point::new(0, 0));
    editor.paint(Point::new(4, 4));
    for y in 0..4 {
        editor.paint(Point::new(2, y));
    }

    let mut frame = 0;
    let mut print_frame = |grid: &CellGrid, event: StepEvent| {
        frame += 1;
        println!("Frame {frame}: {event:?}");
        println!("{grid}");
    };
    match editor.run_search(&mut print_frame, Default::default()) {
        Ok(SearchOutcome::PathFound(length)) => {
            println!("Path of length {length}:");
            println!("{}", editor.grid());
            let path = editor
                .grid()
                .cells()
                .filter(|&(_, status)| status == CellStatus::Path)
                .count();
            println!("{path} cells between start and end");
        }
        Ok(outcome) => println!("No path: {outcome:?}"),
        Err(e) => eprintln!("Could not search: {e}"),
    }
}
