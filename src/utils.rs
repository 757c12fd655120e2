use crate::engine::{symbol_to_value, Grid, GridBuilder};
use crate::error::ValidationError;

/// Parses an array of string slices into a `Grid` of the given `size`.
///
/// Each string slice is one row, starting from row 0, and must hold exactly
/// `size` single-character cells once surrounding whitespace is trimmed.
/// Tiles are written as base-36 digits (`1`-`9`, then `A`-`Z`, either case)
/// and the blank as `#`.
///
/// # Returns
/// * `Ok(Grid)` if every row is well formed and the cells make up each value
///   `1..size²` exactly once plus one blank.
/// * `Err(ValidationError)` describing the first problem found: wrong number
///   of rows, wrong row length, unrecognised symbol, value out of range,
///   repeated value, or repeated blank.
///
/// # Examples
/// ```
/// use sliding_solver::utils::grid_from_str_array;
///
/// let grid = grid_from_str_array(&["123", "4#5", "678"], 3).unwrap();
/// assert_eq!(grid.blank(), (1, 1));
///
/// assert!(grid_from_str_array(&["123", "4#5"], 3).is_err());
/// assert!(grid_from_str_array(&["123", "4#5", "667"], 3).is_err());
/// ```
pub fn grid_from_str_array(rows: &[&str], size: usize) -> Result<Grid, ValidationError> {
    let mut builder = GridBuilder::new(size)?;
    if rows.len() != size {
        return Err(ValidationError::WrongLineCount {
            expected: size,
            found: rows.len(),
        });
    }

    for (r, row) in rows.iter().enumerate() {
        let row = row.trim();
        let found = row.chars().count();
        if found != size {
            return Err(ValidationError::WrongLineLength {
                line: r + 1,
                expected: size,
                found,
            });
        }
        for (c, symbol) in row.chars().enumerate() {
            let value = symbol_to_value(symbol).ok_or(ValidationError::UnrecognizedSymbol {
                symbol,
                line: r + 1,
                column: c + 1,
            })?;
            builder.place(r, c, value)?;
        }
    }
    builder.build()
}

/// Parses the initial grid followed by the target grid from one block of text.
///
/// Blank lines are ignored, so the two grids may be separated by an empty line.
pub fn puzzle_from_text(text: &str, size: usize) -> Result<(Grid, Grid), ValidationError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() != 2 * size {
        return Err(ValidationError::WrongLineCount {
            expected: 2 * size,
            found: lines.len(),
        });
    }
    let (initial, target) = lines.split_at(size);
    Ok((
        grid_from_str_array(initial, size)?,
        grid_from_str_array(target, size)?,
    ))
}
