//! Parity test deciding whether a board can reach the canonical goal.
//!
//! An inversion is a pair of tiles appearing in the opposite order of their
//! values, ignoring the blank. On odd-width boards every move preserves the
//! inversion parity; on even-width boards a vertical move flips it while also
//! changing the blank's row, so the sum of both parities is the invariant.

use std::fmt;

use log::debug;

use crate::puzzle::PuzzleState;

/// Outcome of the parity check, with the numbers it was decided from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolvabilityReport {
    pub solvable: bool,
    pub size: usize,
    pub inversions: usize,
    /// 1-indexed row of the blank, counted from the bottom.
    pub blank_row_from_bottom: usize,
}

fn parity(value: usize) -> &'static str {
    if value % 2 == 0 {
        "even"
    } else {
        "odd"
    }
}

impl fmt::Display for SolvabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.solvable {
            "The puzzle CAN be solved"
        } else {
            "The puzzle can NOT be solved"
        };
        write!(
            f,
            "{}. Inversions: {} ({})",
            verdict,
            self.inversions,
            parity(self.inversions)
        )?;
        if self.size % 2 == 0 {
            write!(
                f,
                ", blank row: {} ({} from the bottom)",
                self.blank_row_from_bottom,
                parity(self.blank_row_from_bottom)
            )?;
        }
        Ok(())
    }
}

/// Counts tile pairs out of order, skipping the blank.
pub fn count_inversions(state: &PuzzleState) -> usize {
    let tiles: Vec<u32> = state
        .tiles()
        .iter()
        .copied()
        .filter(|&t| !state.is_blank(t))
        .collect();

    tiles
        .iter()
        .enumerate()
        .map(|(i, &val)| tiles[i + 1..].iter().filter(|&&next| next < val).count())
        .sum()
}

/// Decides whether `state` can reach the canonical goal of its size.
pub fn check(state: &PuzzleState) -> SolvabilityReport {
    let size = state.size();
    let inversions = count_inversions(state);
    let blank_row_from_bottom = size - state.blank_index() / size;

    let solvable = if size % 2 == 1 {
        inversions % 2 == 0
    } else if blank_row_from_bottom % 2 == 0 {
        inversions % 2 == 1
    } else {
        inversions % 2 == 0
    };

    debug!(
        "parity check on {}x{} board: {} inversions, blank row {} from bottom, solvable={}",
        size, size, inversions, blank_row_from_bottom, solvable
    );

    SolvabilityReport {
        solvable,
        size,
        inversions,
        blank_row_from_bottom,
    }
}

/// Boolean verdict together with its human-readable rationale.
pub fn is_solvable(state: &PuzzleState) -> (bool, String) {
    let report = check(state);
    (report.solvable, report.to_string())
}

/// True when `a` and `b` are the same size and each can be reached from the
/// other. The reachable set of a board is exactly its parity class.
pub fn same_parity_class(a: &PuzzleState, b: &PuzzleState) -> bool {
    a.size() == b.size() && check(a).solvable == check(b).solvable
}
