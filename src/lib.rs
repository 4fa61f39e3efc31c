//! Two small algorithm demonstrations sharing one crate.
//!
//! * Sliding-tile boards: [`puzzle`] (states, moves, heuristic),
//!   [`solvability`] (parity check), [`search`] (A*) and [`validate`].
//! * Points in the plane: [`geometry`] (brute-force and divide-and-conquer
//!   closest pair) and [`points`] (the two-line point file format).
//!
//! The algorithms report failure through their return values; only the
//! input-parsing layers return errors.

pub mod config;
pub mod error;
pub mod geometry;
pub mod points;
pub mod puzzle;
pub mod replay;
pub mod search;
pub mod solvability;
pub mod validate;

pub use error::{PointsError, PuzzleError};
pub use geometry::{brute_force, closest_pair, ClosestPair, Point};
pub use puzzle::{manhattan_distance, Move, PuzzleState};
pub use search::{solve, SearchConfig, SearchReport, SearchStatus, Solver};
pub use solvability::is_solvable;
pub use validate::is_valid_path;
