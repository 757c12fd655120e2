//! Strategies that search for a move sequence from an initial grid to a target grid.
//!
//! - `bfs`: breadth-first search, shortest solution, no depth limit.
//! - `dfs`: depth-limited depth-first search, first solution found.
//! - `genetic`: depth-limited genetic algorithm, best effort.
use crate::engine::Grid;
use crate::error::{InvalidTransition, ValidationError};
use crate::step::SolutionStep;
use std::fmt;

pub mod bfs;
pub mod dfs;
pub mod genetic;

pub use bfs::BreadthFirstSearch;
pub use dfs::DepthFirstSearch;
pub use genetic::{GeneticConfig, GeneticSearch};

/// `Ok(Some(steps))` when a solution was found, `Ok(None)` when the strategy
/// gave up. An `Err` means a strategy produced a parent chain that is not made
/// of legal moves, which is a bug in that strategy.
pub type SolveResult = Result<Option<Vec<SolutionStep>>, InvalidTransition>;

/// Common contract of every strategy. `Display` gives a human-readable label
/// including the strategy's parameters.
pub trait Solver: fmt::Display {
    /// Searches for a solution to the puzzle the solver was built with.
    fn solve(&mut self) -> SolveResult;
}

/// The two endpoints of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    initial: Grid,
    target: Grid,
}

impl Puzzle {
    /// # Errors
    /// `ValidationError::SizeMismatch` if the grids have different sizes.
    pub fn new(initial: Grid, target: Grid) -> Result<Self, ValidationError> {
        if initial.size() != target.size() {
            return Err(ValidationError::SizeMismatch {
                initial: initial.size(),
                target: target.size(),
            });
        }
        Ok(Puzzle { initial, target })
    }

    pub fn initial(&self) -> &Grid {
        &self.initial
    }

    pub fn target(&self) -> &Grid {
        &self.target
    }

    /// True when the initial arrangement already is the target.
    pub fn is_solved(&self) -> bool {
        self.initial == self.target
    }
}
