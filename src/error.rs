use thiserror::Error;

use crate::maze::Pos;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    #[error("unexpected cell '{cell}' at ({row}, {col})")]
    UnexpectedCell { cell: char, row: usize, col: usize },

    #[error("maze has no start cell 'S'")]
    MissingStart,

    #[error("maze has no end cell 'E'")]
    MissingEnd,

    #[error("maze has {count} start cells, expected one")]
    DuplicateStart { count: usize },

    #[error("maze has {count} end cells, expected one")]
    DuplicateEnd { count: usize },

    #[error("{pos} lies outside the maze")]
    OutOfBounds { pos: Pos },

    #[error("start or end cell is a wall")]
    StartOrEndIsWall,

    /// The end cannot be reached from the start.
    #[error("no path from start to end")]
    Unreachable,

    /// A forward move ran into a wall while replaying a walk.
    #[error("move {step} walks into the wall at {pos}")]
    BlockedMove { step: usize, pos: Pos },

    #[error("cost overflows after move {step}")]
    CostOverflow { step: usize },
}
