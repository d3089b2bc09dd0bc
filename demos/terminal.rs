//! Animated A* in the terminal. Barriers are scattered at random, the start is the top-left
//! corner and the end the bottom-right one.
use std::io::Write;
use std::thread;
use std::time::Duration;

use astar_visualizer::{
    AbortFlag, CellGrid, CellStatus, EditEvent, GridEditor, Point, StepEvent, PATH_REVEAL_DELAY,
};
use clap::Parser;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(author, version, about = "Animated A* search on a random grid")]
struct Args {
    /// Number of rows and columns
    #[arg(short, long, default_value_t = astar_visualizer::DEFAULT_GRID_SIZE)]
    size: usize,

    /// Pause after every expanded cell, in milliseconds
    #[arg(short, long, default_value_t = 30)]
    delay_ms: u64,

    /// Seed for the barrier layout
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Probability of a cell being a barrier
    #[arg(long, default_value_t = 0.3)]
    density: f64,

    /// Abort the search after this many redraws
    #[arg(long)]
    abort_after: Option<usize>,
}

/// RGB colour of a status, as drawn by the original pygame board.
fn colour(status: CellStatus) -> (u8, u8, u8) {
    match status {
        CellStatus::Unvisited => (255, 255, 255),
        CellStatus::Start => (255, 165, 0),
        CellStatus::End => (128, 0, 128),
        CellStatus::Barrier => (0, 0, 0),
        CellStatus::Open => (0, 255, 0),
        CellStatus::Closed => (255, 0, 0),
        CellStatus::Path => (0, 0, 255),
    }
}

fn render(grid: &CellGrid) {
    let mut out = String::from("\x1b[H");
    for y in 0..grid.size() as i32 {
        for x in 0..grid.size() as i32 {
            let (r, g, b) = colour(grid.status(Point::new(x, y)));
            out.push_str(&format!("\x1b[48;2;{r};{g};{b}m  "));
        }
        out.push_str("\x1b[0m\n");
    }
    print!("{out}");
    let _ = std::io::stdout().flush();
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.size < 2 {
        eprintln!("Grid size must be at least 2");
        std::process::exit(2);
    }

    let mut editor = GridEditor::new(args.size);
    let last = args.size as i32 - 1;
    editor.apply(EditEvent::Paint(Point::new(0, 0)));
    editor.apply(EditEvent::Paint(Point::new(last, last)));
    let mut rng = StdRng::seed_from_u64(args.seed);
    for (p, _) in editor.grid().cells().collect::<Vec<_>>() {
        if rng.gen_bool(args.density.clamp(0.0, 1.0)) {
            editor.apply(EditEvent::ToggleBarrier(p));
        }
    }
    info!("Reachable: {:?}", editor.is_reachable());

    print!("\x1b[2J");
    render(editor.grid());

    let abort = AbortFlag::new();
    let handle = abort.clone();
    let step_delay = Duration::from_millis(args.delay_ms);
    let mut redraws = 0;
    let mut observer = |grid: &CellGrid, event: StepEvent| {
        render(grid);
        redraws += 1;
        if args.abort_after.is_some_and(|limit| redraws >= limit) {
            handle.abort();
        }
        match event {
            StepEvent::Expanded(_) => thread::sleep(step_delay),
            StepEvent::PathRevealed(_) => thread::sleep(PATH_REVEAL_DELAY),
        }
    };
    match editor.run_search(&mut observer, abort) {
        Ok(outcome) => {
            render(editor.grid());
            println!("{outcome:?}");
        }
        Err(e) => eprintln!("Could not search: {e}"),
    }
}
