use rand::{seq::SliceRandom, Rng};
use std::fmt;

use crate::error::PuzzleError;
use crate::solvability;

/// Direction the blank travels when a move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Generation order used by [`PuzzleState::valid_moves`].
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row and column delta applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// An n x n sliding-tile board stored row-major.
///
/// Tiles are the values `1..=n*n`; the largest value is the blank. A state is
/// never mutated after construction: moves produce new states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    size: usize,
    tiles: Vec<u32>,
    blank: usize,
}

impl PuzzleState {
    /// Builds a board from a flat row-major sequence.
    pub fn new(tiles: Vec<u32>) -> Result<Self, PuzzleError> {
        let cells = tiles.len();
        let size = integer_sqrt(cells);
        if size * size != cells {
            return Err(PuzzleError::NotSquare(cells));
        }
        if size < 2 {
            return Err(PuzzleError::TooSmall(size));
        }

        let mut seen = vec![false; cells + 1];
        for &value in &tiles {
            let slot = value as usize;
            if slot == 0 || slot > cells || seen[slot] {
                return Err(PuzzleError::NotPermutation {
                    expected: cells,
                    value,
                });
            }
            seen[slot] = true;
        }

        let blank_value = cells as u32;
        let blank = tiles
            .iter()
            .position(|&t| t == blank_value)
            .ok_or(PuzzleError::NotPermutation {
                expected: cells,
                value: blank_value,
            })?;

        Ok(Self { size, tiles, blank })
    }

    /// The solved board `1, 2, ..., n*n` with the blank in the bottom-right cell.
    pub fn goal(size: usize) -> Result<Self, PuzzleError> {
        Self::new((1..=(size * size) as u32).collect())
    }

    /// A random board of the given size that can reach [`PuzzleState::goal`].
    pub fn shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, PuzzleError> {
        let mut tiles = Self::goal(size)?.tiles;

        loop {
            tiles.shuffle(rng);
            let candidate = Self::new(tiles.clone())?;
            if solvability::check(&candidate).solvable {
                return Ok(candidate);
            }
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Flat row-major view of the board.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn blank_index(&self) -> usize {
        self.blank
    }

    pub fn blank_value(&self) -> u32 {
        (self.size * self.size) as u32
    }

    pub fn is_blank(&self, value: u32) -> bool {
        value == self.blank_value()
    }

    /// Returns the board reached by moving the blank, or `None` at an edge.
    pub fn apply_move(&self, movement: Move) -> Option<Self> {
        let (dr, dc) = movement.as_offset();
        let row = (self.blank / self.size) as isize + dr;
        let col = (self.blank % self.size) as isize + dc;
        let bound = self.size as isize;

        if row < 0 || row >= bound || col < 0 || col >= bound {
            return None;
        }

        let target = row as usize * self.size + col as usize;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);

        Some(Self {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// Every board one move away, in [`Move::ALL`] order.
    pub fn successors(&self) -> Vec<(Move, Self)> {
        Move::ALL
            .iter()
            .filter_map(|&m| self.apply_move(m).map(|next| (m, next)))
            .collect()
    }

    /// Every board one move away (up, down, left, right).
    pub fn valid_moves(&self) -> Vec<Self> {
        self.successors().into_iter().map(|(_, s)| s).collect()
    }

    /// The move that turns `self` into `next`, if they are one move apart.
    pub fn move_towards(&self, next: &Self) -> Option<Move> {
        self.successors()
            .into_iter()
            .find(|(_, candidate)| candidate == next)
            .map(|(m, _)| m)
    }
}

fn integer_sqrt(value: usize) -> usize {
    let mut root = (value as f64).sqrt() as usize;
    while root * root > value {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= value {
        root += 1;
    }
    root
}

/// Goal cell of every tile value, for repeated heuristic evaluation.
#[derive(Debug, Clone)]
pub struct GoalPositions {
    size: usize,
    blank_value: u32,
    positions: Vec<usize>,
}

impl GoalPositions {
    pub fn new(goal: &PuzzleState) -> Self {
        let mut positions = vec![0; goal.tiles.len() + 1];
        for (index, &value) in goal.tiles.iter().enumerate() {
            positions[value as usize] = index;
        }
        Self {
            size: goal.size,
            blank_value: goal.blank_value(),
            positions,
        }
    }

    /// Sum of row and column distances of every non-blank tile to its goal cell.
    ///
    /// # Panics
    ///
    /// Panics if `state` is not the same size as the goal this table was built from.
    pub fn manhattan(&self, state: &PuzzleState) -> u32 {
        assert_eq!(state.size, self.size, "heuristic evaluated across board sizes");

        let mut distance = 0;
        for (index, &value) in state.tiles.iter().enumerate() {
            if value == self.blank_value {
                continue;
            }
            let target = self.positions[value as usize];
            distance += (index / self.size).abs_diff(target / self.size)
                + (index % self.size).abs_diff(target % self.size);
        }
        distance as u32
    }
}

/// Manhattan distance of `state` from `goal`. Admissible and consistent.
///
/// # Panics
///
/// Panics if the two boards differ in size. [`crate::search::Solver::solve`]
/// rejects such pairs with [`PuzzleError::SizeMismatch`] before evaluating it.
pub fn manhattan_distance(state: &PuzzleState, goal: &PuzzleState) -> u32 {
    GoalPositions::new(goal).manhattan(state)
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.blank_value().to_string().len().max(2);
        let border = format!("+{}", "-".repeat(width + 1)).repeat(self.size) + "+";

        for row in self.tiles.chunks(self.size) {
            writeln!(f, "{}", border)?;
            for &value in row {
                if self.is_blank(value) {
                    write!(f, "|{:width$} ", "", width = width)?;
                } else {
                    write!(f, "|{:>width$} ", value, width = width)?;
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{}", border)
    }
}
