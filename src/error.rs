use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a board from untrusted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("board has {0} cells, which is not a perfect square")]
    NotSquare(usize),
    #[error("board must be at least 2x2, got {0}x{0}")]
    TooSmall(usize),
    #[error("board must contain each of 1..={expected} exactly once (offending value {value})")]
    NotPermutation { expected: usize, value: u32 },
    #[error("start is {start}x{start} but goal is {goal}x{goal}")]
    SizeMismatch { start: usize, goal: usize },
}

/// Errors raised by the point-file reader.
#[derive(Error, Debug)]
pub enum PointsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing line {0} (expected one line of x and one line of y coordinates)")]
    MissingLine(usize),
    #[error("line {line}: invalid coordinate {token:?}: {source}")]
    InvalidCoordinate {
        line: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },
    #[error("{xs} x-coordinates but {ys} y-coordinates")]
    LengthMismatch { xs: usize, ys: usize },
}
