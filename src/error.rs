use grid_util::point::Point;
use thiserror::Error;

/// Reasons a search is refused before it starts.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInvocation {
    #[error("no start cell has been designated")]
    MissingStart,

    #[error("no end cell has been designated")]
    MissingEnd,

    #[error("{0} lies outside the grid")]
    OutOfBounds(Point),

    #[error("endpoint {0} is a barrier")]
    BarrierEndpoint(Point),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseGridError {
    #[error("grid layout is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    #[error("layout contains more than one start cell")]
    DuplicateStart,

    #[error("layout contains more than one end cell")]
    DuplicateEnd,
}
