//! Legal-move rules for the blank tile.
//!
//! Everything here is pure: moves never touch the input grid and return a new
//! one instead. The arena-aware versions that also record parent links live on
//! `crate::state::StateArena`.
use crate::engine::{Direction, Grid};
use rand::seq::SliceRandom;
use rand::Rng;

/// Cell the blank would land on when moved towards `direction`, or `None` if
/// that cell lies outside the grid.
pub fn destination(grid: &Grid, direction: Direction) -> Option<(usize, usize)> {
    let (r, c) = grid.blank();
    let (dr, dc) = direction.offset();
    let nr = r as isize + dr;
    let nc = c as isize + dc;
    let size = grid.size() as isize;
    if nr >= 0 && nr < size && nc >= 0 && nc < size {
        Some((nr as usize, nc as usize))
    } else {
        None
    }
}

/// Moves the blank one cell towards `direction`.
///
/// Returns `None` when the move would take the blank off the grid.
///
/// ```
/// use sliding_solver::engine::{Direction, Grid};
/// use sliding_solver::moves::apply_direction;
///
/// let solved = Grid::solved(3).unwrap();
/// let moved = apply_direction(&solved, Direction::Left).unwrap();
/// assert_eq!(moved.to_string(), "123/456/7#8");
/// assert!(apply_direction(&solved, Direction::Down).is_none());
/// ```
pub fn apply_direction(grid: &Grid, direction: Direction) -> Option<Grid> {
    let target = destination(grid, direction)?;
    let mut moved = grid.clone();
    moved.exchange(grid.blank(), target);
    Some(moved)
}

/// Directions that keep the blank on the grid, in expansion order.
pub fn legal_directions(grid: &Grid) -> impl Iterator<Item = Direction> + '_ {
    Direction::ALL
        .into_iter()
        .filter(move |&d| destination(grid, d).is_some())
}

/// Replays `directions` from `grid`, stopping at the first illegal move.
///
/// Returns the last grid reached together with how many moves were applied.
pub fn apply_directions(grid: &Grid, directions: &[Direction]) -> (Grid, usize) {
    let mut current = grid.clone();
    for (i, &direction) in directions.iter().enumerate() {
        match apply_direction(&current, direction) {
            Some(next) => current = next,
            None => return (current, i),
        }
    }
    (current, directions.len())
}

/// Random walk of `moves` legal moves starting from `grid`.
///
/// The walk never immediately undoes its previous move, so the result is
/// usually (not always) `moves` steps away from the start. Every grid produced
/// this way is reachable from `grid`, which makes it a solvable puzzle.
pub fn scramble(grid: &Grid, moves: usize, rng: &mut impl Rng) -> Grid {
    let mut current = grid.clone();
    let mut last: Option<Direction> = None;
    for _ in 0..moves {
        let candidates: Vec<Direction> = legal_directions(&current)
            .filter(|d| last.map_or(true, |l| *d != l.opposite()))
            .collect();
        // Every cell of a grid of size >= 2 has at least two neighbours, so
        // there is always a candidate left after excluding the reverse move.
        let Some(&direction) = candidates.choose(rng) else {
            break;
        };
        if let Some(next) = apply_direction(&current, direction) {
            current = next;
            last = Some(direction);
        }
    }
    current
}
