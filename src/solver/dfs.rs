use super::{Puzzle, SolveResult, Solver};
use crate::state::{StateArena, StateId};
use std::fmt;
use tracing::debug;

/// Depth-first search bounded by a maximum number of moves.
///
/// Children are visited in expansion order and the first solution met is
/// returned, so it is not necessarily the shortest. A branch never revisits a
/// grid from its own ancestor chain, but distinct branches may explore the same
/// grid again. Recursion depth equals the depth limit.
#[derive(Clone, Debug)]
pub struct DepthFirstSearch {
    puzzle: Puzzle,
    depth_limit: usize,
}

impl DepthFirstSearch {
    pub fn new(puzzle: Puzzle, depth_limit: usize) -> Self {
        DepthFirstSearch {
            puzzle,
            depth_limit,
        }
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// Explores the children of `current`, which sit `depth` moves from the root.
    fn search(&self, arena: &mut StateArena, depth: usize, current: StateId) -> SolveResult {
        if depth > self.depth_limit {
            return Ok(None);
        }

        let children: Vec<StateId> = arena
            .expand(current, &[])
            .into_iter()
            .filter(|&child| !arena.has_ancestor_grid(child, arena.grid(child)))
            .collect();
        let mark = arena.len();

        for child in children {
            if arena.grid(child) == self.puzzle.target() {
                return arena.steps_to(child).map(Some);
            }
            if let Some(steps) = self.search(arena, depth + 1, child)? {
                return Ok(Some(steps));
            }
            // Nothing below `child` is needed any more.
            arena.truncate(mark);
        }
        Ok(None)
    }
}

impl fmt::Display for DepthFirstSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "depth-limited Depth-First Search (depth_limit={})",
            self.depth_limit
        )
    }
}

impl Solver for DepthFirstSearch {
    fn solve(&mut self) -> SolveResult {
        if self.puzzle.is_solved() {
            return Ok(Some(Vec::new()));
        }
        let mut arena = StateArena::new();
        let root = arena.insert_root(self.puzzle.initial().clone());
        let result = self.search(&mut arena, 1, root)?;
        debug!(
            depth_limit = self.depth_limit,
            found = result.is_some(),
            "DFS finished"
        );
        Ok(result)
    }
}
