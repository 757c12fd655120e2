//! Turning pairs of adjacent grids into human-readable steps.
use crate::engine::{value_to_symbol, Grid, BLANK};
use crate::error::InvalidTransition;
use std::collections::BTreeSet;
use std::fmt;

/// Values sitting on different cells in `old` and `new`.
///
/// Grids of different sizes have no comparable cells; the result is then empty.
pub fn differentiate(old: &Grid, new: &Grid) -> BTreeSet<u8> {
    let mut difference = BTreeSet::new();
    if old.size() != new.size() {
        return difference;
    }
    for (&a, &b) in old.cells().iter().zip(new.cells()) {
        if a != b {
            difference.insert(a);
            difference.insert(b);
        }
    }
    difference
}

/// One move of a solution: which tile to click and what the grid looks like afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolutionStep {
    clicked: u8,
    resulting: Grid,
}

impl SolutionStep {
    /// Describes the single move that turns `old` into `new`.
    ///
    /// # Errors
    /// `InvalidTransition` unless exactly one tile traded places with the blank.
    ///
    /// ```
    /// use sliding_solver::engine::{Direction, Grid};
    /// use sliding_solver::moves::apply_direction;
    /// use sliding_solver::step::SolutionStep;
    ///
    /// let old = Grid::solved(3).unwrap();
    /// let new = apply_direction(&old, Direction::Up).unwrap();
    /// let step = SolutionStep::between(&old, &new).unwrap();
    /// assert_eq!(step.clicked(), 6);
    /// assert!(SolutionStep::between(&old, &old).is_err());
    /// ```
    pub fn between(old: &Grid, new: &Grid) -> Result<Self, InvalidTransition> {
        let invalid = || InvalidTransition {
            old: old.clone(),
            new: new.clone(),
        };
        let difference = differentiate(old, new);
        if difference.len() != 2 || !difference.contains(&BLANK) {
            return Err(invalid());
        }
        // A swap with a far-away tile changes the same two values but is no move.
        let (r0, c0) = old.blank();
        let (r1, c1) = new.blank();
        if r0.abs_diff(r1) + c0.abs_diff(c1) != 1 {
            return Err(invalid());
        }
        let clicked = difference
            .into_iter()
            .find(|&v| v != BLANK)
            .ok_or_else(invalid)?;
        Ok(SolutionStep {
            clicked,
            resulting: new.clone(),
        })
    }

    /// Tile value that slides into the blank.
    pub fn clicked(&self) -> u8 {
        self.clicked
    }

    pub fn resulting(&self) -> &Grid {
        &self.resulting
    }
}

impl fmt::Display for SolutionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "click tile {}; resulting grid: {}",
            value_to_symbol(self.clicked),
            self.resulting
        )
    }
}
