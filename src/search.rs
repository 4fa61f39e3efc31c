//! Best-first branch-and-bound (A*) over sliding-tile boards.
//!
//! Nodes live in an append-only arena and point at their parent by index, so
//! the path is rebuilt by walking indices back from the goal. The frontier is
//! a binary heap of `(f, node index)` keys. Because indices grow with every
//! push, ties on `f` pop in insertion order. Stale entries for boards that
//! were settled through a cheaper route are skipped at pop time.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::error::PuzzleError;
use crate::puzzle::{GoalPositions, Move, PuzzleState};

/// Limits applied to a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Stop after this many expansions. `None` searches until the frontier empties.
    pub max_nodes: Option<usize>,
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Solved,
    /// Every board reachable from the start was expanded without meeting the goal.
    FrontierExhausted,
    /// `max_nodes` expansions were spent before the goal was reached.
    BudgetExhausted,
}

/// Result of one call to [`Solver::solve`].
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Boards from start to goal inclusive, or `None` when no path was found.
    pub path: Option<Vec<PuzzleState>>,
    pub nodes_explored: usize,
    pub elapsed: Duration,
    pub status: SearchStatus,
}

impl SearchReport {
    /// Number of moves in the solution.
    pub fn move_count(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len() - 1)
    }

    /// Moves of the blank along the solution.
    pub fn moves(&self) -> Option<Vec<Move>> {
        self.path.as_deref().map(moves_along)
    }
}

/// Labels each consecutive pair of `path` with the move between them.
/// Pairs that are not one move apart are skipped.
pub fn moves_along(path: &[PuzzleState]) -> Vec<Move> {
    path.windows(2)
        .filter_map(|pair| pair[0].move_towards(&pair[1]))
        .collect()
}

#[derive(Debug)]
struct SearchNode {
    state: PuzzleState,
    cost_g: u32,
    cost_h: u32,
    parent: Option<usize>,
}

impl SearchNode {
    fn cost_f(&self) -> u32 {
        self.cost_g + self.cost_h
    }
}

pub struct Solver {
    config: SearchConfig,
}

impl Solver {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Finds a shortest sequence of boards from `start` to `goal`.
    ///
    /// The engine does not run the parity check. An unreachable goal is only
    /// reported after the start's whole component has been expanded, so
    /// callers should consult [`crate::solvability`] first.
    pub fn solve(
        &self,
        start: &PuzzleState,
        goal: &PuzzleState,
    ) -> Result<SearchReport, PuzzleError> {
        if start.size() != goal.size() {
            return Err(PuzzleError::SizeMismatch {
                start: start.size(),
                goal: goal.size(),
            });
        }

        let started = Instant::now();

        if start == goal {
            return Ok(SearchReport {
                path: Some(vec![start.clone()]),
                nodes_explored: 0,
                elapsed: started.elapsed(),
                status: SearchStatus::Solved,
            });
        }

        let heuristic = GoalPositions::new(goal);
        let mut arena: Vec<SearchNode> = Vec::new();
        let mut frontier: BinaryHeap<Reverse<(u32, usize)>> = BinaryHeap::new();
        let mut visited: HashSet<Vec<u32>> = HashSet::new();
        let mut nodes_explored = 0;

        let root = SearchNode {
            cost_h: heuristic.manhattan(start),
            state: start.clone(),
            cost_g: 0,
            parent: None,
        };
        debug!(
            "searching {}x{} board, initial estimate {}",
            start.size(),
            start.size(),
            root.cost_h
        );
        frontier.push(Reverse((root.cost_f(), 0)));
        arena.push(root);

        while let Some(Reverse((_, current))) = frontier.pop() {
            if visited.contains(arena[current].state.tiles()) {
                continue;
            }

            if let Some(max) = self.config.max_nodes {
                if nodes_explored >= max {
                    warn!("search budget of {} expansions spent", max);
                    return Ok(SearchReport {
                        path: None,
                        nodes_explored,
                        elapsed: started.elapsed(),
                        status: SearchStatus::BudgetExhausted,
                    });
                }
            }

            visited.insert(arena[current].state.tiles().to_vec());
            nodes_explored += 1;

            if arena[current].state == *goal {
                let path = reconstruct(&arena, current);
                info!(
                    "solved in {} moves after {} expansions ({} nodes generated)",
                    path.len() - 1,
                    nodes_explored,
                    arena.len()
                );
                return Ok(SearchReport {
                    path: Some(path),
                    nodes_explored,
                    elapsed: started.elapsed(),
                    status: SearchStatus::Solved,
                });
            }

            let cost_g = arena[current].cost_g + 1;
            for next in arena[current].state.valid_moves() {
                if visited.contains(next.tiles()) {
                    continue;
                }
                let node = SearchNode {
                    cost_h: heuristic.manhattan(&next),
                    state: next,
                    cost_g,
                    parent: Some(current),
                };
                frontier.push(Reverse((node.cost_f(), arena.len())));
                arena.push(node);
            }
        }

        warn!(
            "frontier exhausted after {} expansions without reaching the goal",
            nodes_explored
        );
        Ok(SearchReport {
            path: None,
            nodes_explored,
            elapsed: started.elapsed(),
            status: SearchStatus::FrontierExhausted,
        })
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

/// Unbounded search from `start` to `goal`.
pub fn solve(start: &PuzzleState, goal: &PuzzleState) -> Result<SearchReport, PuzzleError> {
    Solver::default().solve(start, goal)
}

fn reconstruct(arena: &[SearchNode], mut index: usize) -> Vec<PuzzleState> {
    let mut path = vec![arena[index].state.clone()];
    while let Some(parent) = arena[index].parent {
        path.push(arena[parent].state.clone());
        index = parent;
    }
    path.reverse();
    path
}
