//! # Sliding Puzzle Solver Library
//!
//! This library finds move sequences that turn one arrangement of an N×N
//! sliding-tile puzzle into another. It offers three interchangeable
//! strategies behind the `solver::Solver` trait: breadth-first search,
//! depth-limited depth-first search, and a depth-limited genetic algorithm.
//!
//! It is used by the `solve_puzzle` binary, which reads two grids as text and
//! prints the steps of a solution.
//!
//! ## Modules
//! - `engine`: the grid (`Grid`, `GridBuilder`) and the `Direction`s the blank moves in.
//! - `moves`: legal-move rules and move replay on plain grids.
//! - `state`: search states with parent links, stored in a `StateArena`.
//! - `step`: `SolutionStep`, rebuilt from two adjacent grids.
//! - `solver`: the `Solver` trait and its three implementations.
//! - `heuristics`: distance scores and the reachability check.
//! - `utils`: parsing grids from text.
//! - `error`: error types.
//!
//! ## Example
//! ```
//! use sliding_solver::solver::{BreadthFirstSearch, Puzzle, Solver};
//! use sliding_solver::utils::grid_from_str_array;
//!
//! let initial = grid_from_str_array(&["123", "4#5", "678"], 3).unwrap();
//! let target = grid_from_str_array(&["123", "45#", "678"], 3).unwrap();
//! let mut bfs = BreadthFirstSearch::new(Puzzle::new(initial, target).unwrap());
//! let steps = bfs.solve().unwrap().unwrap();
//! assert_eq!(steps[0].to_string(), "click tile 5; resulting grid: 123/45#/678");
//! ```

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod moves;
pub mod solver;
pub mod state;
pub mod step;
pub mod utils;
