//! Error types shared across the crate.
//!
//! - `ValidationError`: a grid could not be built from the given input.
//! - `InvalidTransition`: two grids are not one legal move apart.
//! - `ConfigError`: a genetic search configuration is unusable.

use crate::engine::Grid;
use thiserror::Error;

/// Raised while building a `Grid`, either from text or programmatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unsupported grid size {0}, expected a value between 2 and 6")]
    UnsupportedSize(usize),
    #[error("invalid number of lines, expected {expected} but got {found}")]
    WrongLineCount { expected: usize, found: usize },
    #[error("invalid grid format, expected {expected} elements on line {line} but got {found}")]
    WrongLineLength {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("unrecognized symbol '{symbol}' on line {line}, column {column}")]
    UnrecognizedSymbol {
        symbol: char,
        line: usize,
        column: usize,
    },
    #[error("value {value} is out of range, expected a value between 1 and {max}")]
    ValueOutOfRange { value: u8, max: u8 },
    #[error("repeated value {0} found")]
    DuplicateValue(u8),
    #[error("multiple blanks are unacceptable")]
    DuplicateBlank,
    #[error("the grid has no blank")]
    MissingBlank,
    #[error("cell ({row}, {column}) is outside a {size}x{size} grid")]
    OutOfBounds {
        row: usize,
        column: usize,
        size: usize,
    },
    #[error("initial grid is {initial}x{initial} but target grid is {target}x{target}")]
    SizeMismatch { initial: usize, target: usize },
}

/// Two grids handed to step reconstruction are not exactly one legal move apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot turn {old} into {new} in one step")]
pub struct InvalidTransition {
    pub old: Grid,
    pub new: Grid,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("solved fitness {sentinel} must exceed the depth limit {depth_limit}")]
    SentinelTooLow { sentinel: i64, depth_limit: usize },
}
