//! Core grid representation for the sliding-tile puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Direction`: the four ways the blank can travel, in the fixed expansion order.
//! - `Grid`: an immutable N×N arrangement of tiles with exactly one blank.
//! - `GridBuilder`: the mutable construction phase that validates a `Grid`.
use crate::error::ValidationError;
use std::fmt;

/// Cell value reserved for the blank tile.
pub const BLANK: u8 = 0;

/// Character used for the blank in textual grids.
pub const BLANK_SYMBOL: char = '#';

/// Grid size used when none is given.
pub const DEFAULT_SIZE: usize = 3;

/// Smallest supported grid size.
pub const MIN_SIZE: usize = 2;

/// Largest supported grid size. Tiles are written as single base-36 characters,
/// so a 6x6 grid (tiles `1`..=`Z`) is the largest that fits.
pub const MAX_SIZE: usize = 6;

/// A direction the blank tile can move towards.
///
/// The declaration order is the expansion order used by every search strategy:
/// `Left`, `Up`, `Right`, `Down`. Changing it changes which solution BFS picks
/// among equally short ones and the order DFS walks the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// All directions in expansion order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// The `(row, column)` offset applied to the blank's position.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }

    /// One-letter code, used when printing genomes.
    ///
    /// ```
    /// use sliding_solver::engine::Direction;
    /// assert_eq!(Direction::Up.to_char(), 'U');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Up => 'U',
            Direction::Right => 'R',
            Direction::Down => 'D',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Converts a cell value to its textual symbol (`#` for the blank, base-36 otherwise).
pub fn value_to_symbol(value: u8) -> char {
    if value == BLANK {
        BLANK_SYMBOL
    } else {
        std::char::from_digit(value as u32, 36)
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

/// Converts a textual symbol back into a cell value. Returns `None` for
/// characters that are neither the blank symbol nor a base-36 digit other than `0`.
pub fn symbol_to_value(symbol: char) -> Option<u8> {
    if symbol == BLANK_SYMBOL {
        return Some(BLANK);
    }
    match symbol.to_digit(36) {
        Some(0) | None => None,
        Some(d) => Some(d as u8),
    }
}

/// An N×N arrangement of the puzzle.
///
/// A `Grid` always holds every value `1..N²` exactly once plus a single blank,
/// and caches where the blank sits. Once built it is never modified; moves
/// produce new grids (see `crate::moves`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<u8>,
    blank: (usize, usize),
}

impl Grid {
    /// Returns the canonical solved arrangement: tiles in reading order, blank last.
    ///
    /// ```
    /// use sliding_solver::engine::Grid;
    /// let grid = Grid::solved(3).unwrap();
    /// assert_eq!(grid.to_string(), "123/456/78#");
    /// ```
    pub fn solved(size: usize) -> Result<Self, ValidationError> {
        check_size(size)?;
        let last = size * size;
        let mut cells: Vec<u8> = (1..last as u8).collect();
        cells.push(BLANK);
        Ok(Grid {
            size,
            cells,
            blank: (size - 1, size - 1),
        })
    }

    /// Builds a grid from rows of cell values, with `BLANK` marking the blank.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, ValidationError> {
        let mut builder = GridBuilder::new(rows.len())?;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != rows.len() {
                return Err(ValidationError::WrongLineLength {
                    line: r + 1,
                    expected: rows.len(),
                    found: row.len(),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                builder.place(r, c, value)?;
            }
        }
        builder.build()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Position `(row, column)` of the blank.
    pub fn blank(&self) -> (usize, usize) {
        self.blank
    }

    /// Returns the value at `(r, c)`.
    ///
    /// # Errors
    /// `ValidationError::OutOfBounds` if the cell lies outside the grid.
    pub fn fetch(&self, r: usize, c: usize) -> Result<u8, ValidationError> {
        if r >= self.size || c >= self.size {
            return Err(ValidationError::OutOfBounds {
                row: r,
                column: c,
                size: self.size,
            });
        }
        Ok(self.cells[r * self.size + c])
    }

    /// Row-major view of all cells.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Where each value sits, indexed by value (`positions()[BLANK]` is the blank).
    pub fn positions(&self) -> Vec<(usize, usize)> {
        let mut positions = vec![(0, 0); self.cells.len()];
        for (ix, &value) in self.cells.iter().enumerate() {
            positions[value as usize] = (ix / self.size, ix % self.size);
        }
        positions
    }

    /// Swaps two in-bounds cells, keeping the blank cache in sync.
    /// Callers guarantee both coordinates are inside the grid.
    pub(crate) fn exchange(&mut self, a: (usize, usize), b: (usize, usize)) {
        let ia = a.0 * self.size + a.1;
        let ib = b.0 * self.size + b.1;
        self.cells.swap(ia, ib);
        if self.cells[ia] == BLANK {
            self.blank = a;
        } else if self.cells[ib] == BLANK {
            self.blank = b;
        }
    }

    /// Multi-line rendering, one row per line.
    pub fn to_multiline_string(&self) -> String {
        format!("{:#}", self)
    }
}

/// `{}` prints rows joined by `/` (`123/45#/678`); `{:#}` prints one row per line.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if f.alternate() { "\n" } else { "/" };
        for (r, row) in self.cells.chunks(self.size).enumerate() {
            if r > 0 {
                f.write_str(separator)?;
            }
            for &value in row {
                write!(f, "{}", value_to_symbol(value))?;
            }
        }
        Ok(())
    }
}

fn check_size(size: usize) -> Result<(), ValidationError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedSize(size))
    }
}

/// Mutable construction phase of a `Grid`.
///
/// Cells are placed one at a time; `build` checks that the result is a
/// complete permutation with exactly one blank.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    size: usize,
    cells: Vec<Option<u8>>,
}

impl GridBuilder {
    pub fn new(size: usize) -> Result<Self, ValidationError> {
        check_size(size)?;
        Ok(GridBuilder {
            size,
            cells: vec![None; size * size],
        })
    }

    /// Places `value` at `(r, c)`, rejecting out-of-range cells and values and
    /// any value (or blank) that is already on the grid elsewhere.
    pub fn place(&mut self, r: usize, c: usize, value: u8) -> Result<&mut Self, ValidationError> {
        if r >= self.size || c >= self.size {
            return Err(ValidationError::OutOfBounds {
                row: r,
                column: c,
                size: self.size,
            });
        }
        let max = (self.size * self.size - 1) as u8;
        if value > max {
            return Err(ValidationError::ValueOutOfRange { value, max });
        }
        let ix = r * self.size + c;
        let repeated = self
            .cells
            .iter()
            .enumerate()
            .any(|(i, cell)| i != ix && *cell == Some(value));
        if repeated {
            return Err(if value == BLANK {
                ValidationError::DuplicateBlank
            } else {
                ValidationError::DuplicateValue(value)
            });
        }
        self.cells[ix] = Some(value);
        Ok(self)
    }

    pub fn build(&self) -> Result<Grid, ValidationError> {
        let mut cells = Vec::with_capacity(self.cells.len());
        let mut blank = None;
        for (ix, cell) in self.cells.iter().enumerate() {
            match cell {
                Some(value) => {
                    if *value == BLANK {
                        blank = Some((ix / self.size, ix % self.size));
                    }
                    cells.push(*value);
                }
                None => {
                    return Err(ValidationError::WrongLineLength {
                        line: ix / self.size + 1,
                        expected: self.size,
                        found: ix % self.size,
                    })
                }
            }
        }
        let blank = blank.ok_or(ValidationError::MissingBlank)?;
        Ok(Grid {
            size: self.size,
            cells,
            blank,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::apply_direction;

    fn grid(rows: &[&[u8]]) -> Grid {
        let rows: Vec<Vec<u8>> = rows.iter().map(|r| r.to_vec()).collect();
        Grid::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_solved_grid() {
        let g = Grid::solved(3).unwrap();
        assert_eq!(g.blank(), (2, 2));
        assert_eq!(g.fetch(0, 0).unwrap(), 1);
        assert_eq!(g.fetch(2, 1).unwrap(), 8);
        assert_eq!(g.fetch(2, 2).unwrap(), BLANK);
    }

    #[test]
    fn test_solved_rejects_unsupported_sizes() {
        assert_eq!(Grid::solved(1), Err(ValidationError::UnsupportedSize(1)));
        assert_eq!(Grid::solved(7), Err(ValidationError::UnsupportedSize(7)));
    }

    #[test]
    fn test_fetch_out_of_bounds() {
        let g = Grid::solved(2).unwrap();
        assert_eq!(
            g.fetch(2, 0),
            Err(ValidationError::OutOfBounds {
                row: 2,
                column: 0,
                size: 2
            })
        );
    }

    #[test]
    fn test_from_rows_tracks_blank() {
        let g = grid(&[&[1, 2, 3], &[4, 0, 5], &[6, 7, 8]]);
        assert_eq!(g.blank(), (1, 1));
        assert_eq!(g.to_string(), "123/4#5/678");
        assert_eq!(g.to_multiline_string(), "123\n4#5\n678");
    }

    #[test]
    fn test_builder_rejects_duplicates_and_incomplete_grid() {
        let mut builder = GridBuilder::new(2).unwrap();
        builder.place(0, 0, 1).unwrap();
        assert_eq!(builder.place(0, 1, 1).unwrap_err(), ValidationError::DuplicateValue(1));
        builder.place(0, 1, BLANK).unwrap();
        assert_eq!(builder.place(1, 0, BLANK).unwrap_err(), ValidationError::DuplicateBlank);
        builder.place(1, 0, 2).unwrap();
        builder.place(1, 1, 3).unwrap();
        assert!(builder.build().is_ok());

        let mut incomplete = GridBuilder::new(2).unwrap();
        incomplete.place(0, 0, 1).unwrap().place(0, 1, 2).unwrap();
        assert!(matches!(
            incomplete.build(),
            Err(ValidationError::WrongLineLength { line: 2, .. })
        ));
    }

    #[test]
    fn test_builder_rejects_out_of_range_value() {
        let mut builder = GridBuilder::new(2).unwrap();
        assert_eq!(
            builder.place(0, 0, 4).unwrap_err(),
            ValidationError::ValueOutOfRange { value: 4, max: 3 }
        );
    }

    #[test]
    fn test_equality_ignores_how_grid_was_built() {
        let a = grid(&[&[1, 2], &[3, 0]]);
        let b = Grid::solved(2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(value_to_symbol(BLANK), '#');
        assert_eq!(value_to_symbol(9), '9');
        assert_eq!(value_to_symbol(10), 'A');
        assert_eq!(value_to_symbol(35), 'Z');
        assert_eq!(symbol_to_value('#'), Some(BLANK));
        assert_eq!(symbol_to_value('a'), Some(10));
        assert_eq!(symbol_to_value('0'), None);
        assert_eq!(symbol_to_value('*'), None);
    }

    #[test]
    fn test_direction_opposites_cancel() {
        for d in Direction::ALL {
            let (dr, dc) = d.offset();
            let (or, oc) = d.opposite().offset();
            assert_eq!((dr + or, dc + oc), (0, 0));
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let original = grid(&[&[1, 2, 3], &[4, 0, 5], &[6, 7, 8]]);
        let mut clone = original.clone();
        let path = [Direction::Left, Direction::Up, Direction::Right];

        let mut a = original.clone();
        let mut b = clone.clone();
        for d in path {
            a = apply_direction(&a, d).unwrap();
            b = apply_direction(&b, d).unwrap();
        }
        assert_eq!(a, b);

        clone.exchange((0, 0), (0, 1));
        assert_eq!(original.fetch(0, 0).unwrap(), 1);
        assert_eq!(clone.fetch(0, 0).unwrap(), 2);
    }
}
