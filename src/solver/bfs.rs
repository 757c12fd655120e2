use super::{Puzzle, SolveResult, Solver};
use crate::engine::{Direction, Grid};
use crate::state::StateArena;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use tracing::debug;

/// Breadth-first search without a depth limit.
///
/// Returns a shortest solution whenever the target is reachable. A grid is
/// enqueued only the first time it is seen, so an unreachable target ends the
/// search once the reachable part of the state space is exhausted. That space
/// grows very quickly with the grid size (181440 arrangements for 3x3, about
/// 10^13 for 4x4); far-away 4x4 targets are out of reach in practice.
#[derive(Clone, Debug)]
pub struct BreadthFirstSearch {
    puzzle: Puzzle,
}

impl BreadthFirstSearch {
    pub fn new(puzzle: Puzzle) -> Self {
        BreadthFirstSearch { puzzle }
    }
}

impl fmt::Display for BreadthFirstSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Breadth-First Search")
    }
}

impl BreadthFirstSearch {
    /// Runs the search, keeping in `arena` exactly one state per enqueued grid.
    fn search(&self, arena: &mut StateArena) -> SolveResult {
        let mut seen: HashSet<Grid> = HashSet::new();
        let mut frontier = VecDeque::new();

        let root = arena.insert_root(self.puzzle.initial().clone());
        seen.insert(self.puzzle.initial().clone());
        frontier.push_back(root);

        while let Some(current) = frontier.pop_front() {
            if arena.grid(current) == self.puzzle.target() {
                debug!(states = arena.len(), "BFS reached the target");
                return arena.steps_to(current).map(Some);
            }
            for direction in Direction::ALL {
                let Some(child) = arena.apply_move(current, direction) else {
                    continue;
                };
                // The visited set also covers the ancestor chain of `current`.
                if seen.insert(arena.grid(child).clone()) {
                    frontier.push_back(child);
                } else {
                    arena.truncate(child.index());
                }
            }
        }

        debug!(states = arena.len(), "BFS exhausted the frontier");
        Ok(None)
    }
}

impl Solver for BreadthFirstSearch {
    fn solve(&mut self) -> SolveResult {
        self.search(&mut StateArena::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{apply_directions, scramble};
    use crate::utils::grid_from_str_array;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn solve(initial: Grid, target: Grid) -> Option<Vec<crate::step::SolutionStep>> {
        BreadthFirstSearch::new(Puzzle::new(initial, target).unwrap())
            .solve()
            .unwrap()
    }

    #[test]
    fn test_bfs_one_move() {
        let initial = grid_from_str_array(&["123", "4#5", "678"], 3).unwrap();
        let target = grid_from_str_array(&["123", "45#", "678"], 3).unwrap();
        let steps = solve(initial, target.clone()).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].clicked(), 5);
        assert_eq!(steps[0].resulting(), &target);
    }

    #[test]
    fn test_bfs_already_solved() {
        let solved = Grid::solved(3).unwrap();
        assert_eq!(solve(solved.clone(), solved), Some(Vec::new()));
    }

    #[test]
    fn test_bfs_finds_shortest_path() {
        let target = Grid::solved(3).unwrap();
        // Three moves out, with a detour that cancels itself.
        let (initial, applied) = apply_directions(
            &target,
            &[
                Direction::Left,
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Up,
            ],
        );
        assert_eq!(applied, 5);
        let steps = solve(initial, target.clone()).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps.last().unwrap().resulting(), &target);
    }

    #[test]
    fn test_bfs_steps_chain_together() {
        let target = Grid::solved(3).unwrap();
        let initial = scramble(&target, 12, &mut SmallRng::seed_from_u64(3));
        let steps = solve(initial.clone(), target.clone()).unwrap();
        assert!(steps.len() <= 12);

        let mut previous = initial;
        for step in &steps {
            let check = crate::step::SolutionStep::between(&previous, step.resulting()).unwrap();
            assert_eq!(&check, step);
            previous = step.resulting().clone();
        }
        assert_eq!(previous, target);
    }

    #[test]
    fn test_bfs_unreachable_2x2() {
        let initial = grid_from_str_array(&["21", "3#"], 2).unwrap();
        let target = Grid::solved(2).unwrap();
        assert_eq!(solve(initial, target), None);
    }

    #[test]
    fn test_bfs_unreachable_3x3() {
        let initial = grid_from_str_array(&["213", "456", "78#"], 3).unwrap();
        let target = Grid::solved(3).unwrap();
        let search = BreadthFirstSearch::new(Puzzle::new(initial, target).unwrap());
        let mut arena = StateArena::new();
        assert_eq!(search.search(&mut arena).unwrap(), None);
        // One stored state per reachable arrangement, duplicates are released.
        assert_eq!(arena.len(), 181440);
    }

    #[test]
    fn test_bfs_stores_each_grid_once() {
        let initial = grid_from_str_array(&["21", "3#"], 2).unwrap();
        let target = Grid::solved(2).unwrap();
        let search = BreadthFirstSearch::new(Puzzle::new(initial, target).unwrap());
        let mut arena = StateArena::new();
        assert_eq!(search.search(&mut arena).unwrap(), None);
        // Half of the 4! arrangements are reachable.
        assert_eq!(arena.len(), 12);
    }
}
