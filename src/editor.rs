//! Cell editing as driven by a pointer and keyboard UI. [GridEditor] owns the grid together with
//! the start and end designations and keeps them consistent: there is at most one start and one
//! end, and neither is ever a barrier.
use grid_util::point::Point;
use log::{debug, info};

use crate::error::InvalidInvocation;
use crate::grid::{CellGrid, CellStatus};
use crate::solver::astar::AstarSearch;
use crate::solver::{AbortFlag, SearchObserver, SearchOutcome};
use crate::DEFAULT_GRID_SIZE;

/// A single edit request coming from the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditEvent {
    PlaceStart(Point),
    PlaceEnd(Point),
    ToggleBarrier(Point),
    /// Primary click: designates the start, then the end, then paints barriers.
    Paint(Point),
    /// Secondary click: clears the cell and any designation on it.
    Erase(Point),
    Reset,
}

#[derive(Clone, Debug)]
pub struct GridEditor {
    grid: CellGrid,
    start: Option<Point>,
    end: Option<Point>,
}

impl Default for GridEditor {
    fn default() -> GridEditor {
        GridEditor::new(DEFAULT_GRID_SIZE)
    }
}

impl GridEditor {
    pub fn new(n: usize) -> GridEditor {
        GridEditor {
            grid: CellGrid::new(n),
            start: None,
            end: None,
        }
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }
    /// Mutable access for driving an [AstarSearch] step by step. Status edits made through it
    /// are not checked against the designations.
    pub fn grid_mut(&mut self) -> &mut CellGrid {
        &mut self.grid
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Applies an edit and reports whether the grid changed.
    pub fn apply(&mut self, event: EditEvent) -> bool {
        match event {
            EditEvent::PlaceStart(p) => self.place_start(p),
            EditEvent::PlaceEnd(p) => self.place_end(p),
            EditEvent::ToggleBarrier(p) => self.toggle_barrier(p),
            EditEvent::Paint(p) => self.paint(p),
            EditEvent::Erase(p) => self.erase(p),
            EditEvent::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Moves the start to `point`. Taking over the end cell leaves the end undesignated.
    pub fn place_start(&mut self, point: Point) -> bool {
        if !self.grid.in_bounds(point) || self.start == Some(point) {
            return false;
        }
        if self.end == Some(point) {
            self.end = None;
        }
        if let Some(old) = self.start.replace(point) {
            self.grid.reset_cell(old);
        }
        self.grid.set_status(point, CellStatus::Start);
        true
    }

    /// Moves the end to `point`. Taking over the start cell leaves the start undesignated.
    pub fn place_end(&mut self, point: Point) -> bool {
        if !self.grid.in_bounds(point) || self.end == Some(point) {
            return false;
        }
        if self.start == Some(point) {
            self.start = None;
        }
        if let Some(old) = self.end.replace(point) {
            self.grid.reset_cell(old);
        }
        self.grid.set_status(point, CellStatus::End);
        true
    }

    /// Adds or removes a barrier. The start and end cells are left alone.
    pub fn toggle_barrier(&mut self, point: Point) -> bool {
        if !self.grid.in_bounds(point) || self.is_designated(point) {
            return false;
        }
        let status = if self.grid.status(point).is_barrier() {
            CellStatus::Unvisited
        } else {
            CellStatus::Barrier
        };
        self.grid.set_status(point, status);
        true
    }

    pub fn paint(&mut self, point: Point) -> bool {
        if !self.grid.in_bounds(point) {
            return false;
        }
        if self.start.is_none() && self.end != Some(point) {
            self.place_start(point)
        } else if self.end.is_none() && self.start != Some(point) {
            self.place_end(point)
        } else if !self.is_designated(point) && !self.grid.status(point).is_barrier() {
            self.grid.set_status(point, CellStatus::Barrier);
            true
        } else {
            false
        }
    }

    pub fn erase(&mut self, point: Point) -> bool {
        if !self.grid.in_bounds(point) {
            return false;
        }
        let changed = self.grid.status(point) != CellStatus::Unvisited;
        self.grid.reset_cell(point);
        if self.start == Some(point) {
            self.start = None;
        }
        if self.end == Some(point) {
            self.end = None;
        }
        changed
    }

    /// Starts over with an empty grid of the same size.
    pub fn reset(&mut self) {
        debug!("Resetting {0}x{0} grid", self.grid.size());
        self.grid = CellGrid::new(self.grid.size());
        self.start = None;
        self.end = None;
    }

    /// Whether the end can be reached from the start given the current barriers, without
    /// running a search. [None] until both are designated.
    pub fn is_reachable(&mut self) -> Option<bool> {
        let (start, end) = (self.start?, self.end?);
        self.grid.update();
        Some(self.grid.reachable(&start, &end))
    }

    /// Clears the marks of a previous search, recomputes the neighbour lists and creates a search
    /// between the designated cells, to be stepped on [grid_mut](Self::grid_mut).
    pub fn prepare_search(&mut self) -> Result<AstarSearch, InvalidInvocation> {
        let start = self.start.ok_or(InvalidInvocation::MissingStart)?;
        let end = self.end.ok_or(InvalidInvocation::MissingEnd)?;
        self.grid.clear_search_marks();
        self.grid.recompute_neighbours();
        AstarSearch::new(&self.grid, start, end)
    }

    /// Runs a search between the designated cells to completion.
    pub fn run_search<O>(
        &mut self,
        observer: &mut O,
        abort: AbortFlag,
    ) -> Result<SearchOutcome, InvalidInvocation>
    where
        O: SearchObserver + ?Sized,
    {
        let mut search = self.prepare_search()?.with_abort_flag(abort);
        let outcome = search.run(&mut self.grid, observer);
        info!("Search finished: {:?}", outcome);
        Ok(outcome)
    }

    fn is_designated(&self, point: Point) -> bool {
        self.start == Some(point) || self.end == Some(point)
    }
}
