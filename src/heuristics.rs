//! Scores and checks that compare a grid with a target arrangement.
use crate::engine::{Grid, BLANK};

/// Sum, over every cell value including the blank, of the squared Manhattan
/// distance between where it sits in `grid` and where it sits in `target`.
///
/// The genetic search negates this to rank genomes: the closer a grid is to
/// the target, the nearer the score is to zero.
///
/// ```
/// use sliding_solver::engine::{Direction, Grid};
/// use sliding_solver::heuristics::squared_manhattan_distance;
/// use sliding_solver::moves::apply_direction;
///
/// let solved = Grid::solved(3).unwrap();
/// let moved = apply_direction(&solved, Direction::Left).unwrap();
/// assert_eq!(squared_manhattan_distance(&solved, &solved), 0);
/// // Tile 8 and the blank, one cell each.
/// assert_eq!(squared_manhattan_distance(&moved, &solved), 2);
/// ```
pub fn squared_manhattan_distance(grid: &Grid, target: &Grid) -> i64 {
    let here = grid.positions();
    let there = target.positions();
    here.iter()
        .zip(&there)
        .map(|(&(r0, c0), &(r1, c1))| {
            let d = (r0.abs_diff(r1) + c0.abs_diff(c1)) as i64;
            d * d
        })
        .sum()
}

/// Sum of plain Manhattan distances of the numbered tiles (the blank is left out).
///
/// Every move shifts one tile by one cell, so this never exceeds the number of
/// moves still needed: it is an admissible lower bound on the solution length.
pub fn manhattan_distance(grid: &Grid, target: &Grid) -> usize {
    let here = grid.positions();
    let there = target.positions();
    here.iter()
        .zip(&there)
        .enumerate()
        .filter(|(value, _)| *value != BLANK as usize)
        .map(|(_, (&(r0, c0), &(r1, c1)))| r0.abs_diff(r1) + c0.abs_diff(c1))
        .sum()
}

/// Whether `target` can be reached from `initial` at all.
///
/// Every move is a transposition of the blank with a neighbour and shifts the
/// blank by one cell, so the parity of the permutation that carries `initial`
/// onto `target` must match the parity of the blank's Manhattan displacement.
/// For sliding puzzles that condition is also sufficient.
pub fn is_reachable(initial: &Grid, target: &Grid) -> bool {
    if initial.size() != target.size() {
        return false;
    }
    let there = target.positions();
    let size = initial.size();
    let permutation: Vec<usize> = initial
        .cells()
        .iter()
        .map(|&value| {
            let (r, c) = there[value as usize];
            r * size + c
        })
        .collect();

    let (r0, c0) = initial.blank();
    let (r1, c1) = target.blank();
    let blank_parity = (r0.abs_diff(r1) + c0.abs_diff(c1)) % 2;
    permutation_parity(&permutation) == blank_parity
}

/// 0 for an even permutation, 1 for an odd one.
fn permutation_parity(permutation: &[usize]) -> usize {
    let mut visited = vec![false; permutation.len()];
    let mut cycles = 0;
    for start in 0..permutation.len() {
        if visited[start] {
            continue;
        }
        cycles += 1;
        let mut ix = start;
        while !visited[ix] {
            visited[ix] = true;
            ix = permutation[ix];
        }
    }
    (permutation.len() - cycles) % 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Direction;
    use crate::moves::{apply_directions, scramble};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn grid(rows: &[&[u8]]) -> Grid {
        let rows: Vec<Vec<u8>> = rows.iter().map(|r| r.to_vec()).collect();
        Grid::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_squared_distance_of_far_corner() {
        let solved = Grid::solved(3).unwrap();
        // 1 and the blank trade the two far corners: 4^2 each.
        let swapped = grid(&[&[0, 2, 3], &[4, 5, 6], &[7, 8, 1]]);
        assert_eq!(squared_manhattan_distance(&swapped, &solved), 32);
        assert_eq!(manhattan_distance(&swapped, &solved), 4);
    }

    #[test]
    fn test_manhattan_lower_bound() {
        let solved = Grid::solved(3).unwrap();
        let (moved, applied) = apply_directions(
            &solved,
            &[Direction::Left, Direction::Up, Direction::Right, Direction::Down],
        );
        assert_eq!(applied, 4);
        assert!(manhattan_distance(&moved, &solved) <= 4);
        assert_eq!(manhattan_distance(&solved, &solved), 0);
    }

    #[test]
    fn test_scrambled_grids_are_reachable() {
        let mut rng = SmallRng::seed_from_u64(42);
        for size in 2..=5 {
            let solved = Grid::solved(size).unwrap();
            for _ in 0..10 {
                let scrambled = scramble(&solved, 50, &mut rng);
                assert!(is_reachable(&scrambled, &solved));
                assert!(is_reachable(&solved, &scrambled));
            }
        }
    }

    #[test]
    fn test_swapped_tiles_are_unreachable() {
        let solved = Grid::solved(3).unwrap();
        let swapped = grid(&[&[2, 1, 3], &[4, 5, 6], &[7, 8, 0]]);
        assert!(!is_reachable(&swapped, &solved));

        let solved = Grid::solved(4).unwrap();
        let swapped = grid(&[
            &[1, 2, 3, 4],
            &[5, 6, 7, 8],
            &[9, 10, 11, 12],
            &[13, 15, 14, 0],
        ]);
        assert!(!is_reachable(&swapped, &solved));
    }

    #[test]
    fn test_size_mismatch_is_unreachable() {
        assert!(!is_reachable(&Grid::solved(2).unwrap(), &Grid::solved(3).unwrap()));
    }
}
