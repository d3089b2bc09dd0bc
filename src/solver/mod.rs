//! The A* search engine and the types it shares with the embedding UI.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;

use crate::grid::CellGrid;

pub mod astar;
pub mod reconstruct;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Phase of the search state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    /// The frontier is non-empty and the goal has not been popped yet.
    Running,
    /// The goal was popped and the path has been reconstructed.
    Succeeded,
    /// The frontier ran dry before the goal was reached.
    Failed,
    /// The [AbortFlag] was raised between two iterations.
    Aborted,
}

impl SearchStatus {
    pub fn is_running(self) -> bool {
        self == SearchStatus::Running
    }
}

/// Result of a completed search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchOutcome {
    /// A shortest path with the given number of moves.
    PathFound(usize),
    NoPathExists,
    Aborted,
}

impl SearchOutcome {
    pub fn path_length(self) -> Option<usize> {
        match self {
            SearchOutcome::PathFound(length) => Some(length),
            _ => None,
        }
    }
}

/// What changed on the grid right before an observer is called.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepEvent {
    /// The cell was popped from the frontier and its neighbours were processed.
    Expanded(Point),
    /// The cell was marked as part of the path.
    PathRevealed(Point),
}

/// Collaborator notified after every state change of a search, typically to redraw. This is the
/// only point where a search hands control back before it finishes.
pub trait SearchObserver {
    fn on_step(&mut self, grid: &CellGrid, event: StepEvent);
}

impl<F> SearchObserver for F
where
    F: FnMut(&CellGrid, StepEvent),
{
    fn on_step(&mut self, grid: &CellGrid, event: StepEvent) {
        self(grid, event)
    }
}

/// Observer that ignores every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_step(&mut self, _: &CellGrid, _: StepEvent) {}
}

/// Shared cancellation flag, checked once at the start of every search iteration. Clones refer
/// to the same flag, so an observer or an input handler can hold one.
#[derive(Clone, Debug, Default)]
pub struct AbortFlag(Arc<AtomicBool>);

impl AbortFlag {
    pub fn new() -> AbortFlag {
        AbortFlag::default()
    }
    pub fn abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
    pub fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}
