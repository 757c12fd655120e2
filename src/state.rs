//! Search states and the arena that owns them.
//!
//! A `PuzzleState` pairs a `Grid` with the link back to the state it was
//! derived from. Links are indices into a `StateArena`, so a long parent chain
//! is just a walk over integers and no state owns its parent.
use crate::engine::{Direction, Grid};
use crate::error::InvalidTransition;
use crate::moves::apply_direction;
use crate::step::SolutionStep;
use std::hash::{Hash, Hasher};

/// Index of a state inside a `StateArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One arrangement reached during a search.
///
/// Two states are equal when their grids are equal; `parent` and
/// `producing_move` take no part in equality or hashing.
#[derive(Clone, Debug)]
pub struct PuzzleState {
    grid: Grid,
    parent: Option<StateId>,
    producing_move: Option<Direction>,
}

impl PuzzleState {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// `None` for a root state.
    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    /// Direction applied to the parent to reach this state; `None` for a root.
    pub fn producing_move(&self) -> Option<Direction> {
        self.producing_move
    }
}

impl PartialEq for PuzzleState {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

impl Eq for PuzzleState {}

impl Hash for PuzzleState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.grid.hash(state);
    }
}

/// Append-only storage for the states of one search.
///
/// States are only ever added through `insert_root` and `apply_move`, which
/// keeps every parent link pointing at an earlier slot. `truncate` drops the
/// most recently added states, which a depth-first search uses to release
/// branches it has finished with.
#[derive(Debug, Default)]
pub struct StateArena {
    states: Vec<PuzzleState>,
}

impl StateArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `grid` as a state without a parent.
    pub fn insert_root(&mut self, grid: Grid) -> StateId {
        self.push(PuzzleState {
            grid,
            parent: None,
            producing_move: None,
        })
    }

    fn push(&mut self, state: PuzzleState) -> StateId {
        self.states.push(state);
        StateId(self.states.len() - 1)
    }

    /// # Panics
    /// Panics if `id` was released by `truncate` or came from another arena.
    pub fn get(&self, id: StateId) -> &PuzzleState {
        &self.states[id.0]
    }

    pub fn grid(&self, id: StateId) -> &Grid {
        &self.states[id.0].grid
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drops every state stored at index `len` or above.
    pub fn truncate(&mut self, len: usize) {
        self.states.truncate(len);
    }

    /// Applies one move to the state `id`, storing the result with `id` as its
    /// parent. Returns `None` (and stores nothing) if the move is illegal.
    pub fn apply_move(&mut self, id: StateId, direction: Direction) -> Option<StateId> {
        let grid = apply_direction(self.grid(id), direction)?;
        Some(self.push(PuzzleState {
            grid,
            parent: Some(id),
            producing_move: Some(direction),
        }))
    }

    /// Applies every direction not listed in `excluded`, in expansion order,
    /// and returns the legal successors.
    pub fn expand(&mut self, id: StateId, excluded: &[Direction]) -> Vec<StateId> {
        Direction::ALL
            .into_iter()
            .filter(|d| !excluded.contains(d))
            .filter_map(|d| self.apply_move(id, d))
            .collect()
    }

    /// Iterates over the ancestors of `id`, nearest parent first, ending at the root.
    pub fn ancestors(&self, id: StateId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: self.get(id).parent,
        }
    }

    /// True if some ancestor of `id` holds the same grid as `candidate`.
    pub fn has_ancestor_grid(&self, id: StateId, candidate: &Grid) -> bool {
        self.ancestors(id).any(|a| self.grid(a) == candidate)
    }

    /// The chain from the root down to `id`, both ends included.
    pub fn path_to(&self, id: StateId) -> Vec<StateId> {
        let mut path: Vec<StateId> = self.ancestors(id).collect();
        path.reverse();
        path.push(id);
        path
    }

    /// Turns the parent chain ending at `id` into root-to-goal solution steps.
    pub fn steps_to(&self, id: StateId) -> Result<Vec<SolutionStep>, InvalidTransition> {
        self.path_to(id)
            .windows(2)
            .map(|pair| SolutionStep::between(self.grid(pair[0]), self.grid(pair[1])))
            .collect()
    }
}

/// Iterator returned by `StateArena::ancestors`.
pub struct Ancestors<'a> {
    arena: &'a StateArena,
    next: Option<StateId>,
}

impl Iterator for Ancestors<'_> {
    type Item = StateId;

    fn next(&mut self) -> Option<StateId> {
        let current = self.next?;
        self.next = self.arena.get(current).parent;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_root_has_no_links() {
        let mut arena = StateArena::new();
        let root = arena.insert_root(Grid::solved(3).unwrap());
        assert_eq!(arena.get(root).parent(), None);
        assert_eq!(arena.get(root).producing_move(), None);
        assert_eq!(arena.ancestors(root).count(), 0);
    }

    #[test]
    fn test_apply_move_records_parent_and_direction() {
        let mut arena = StateArena::new();
        let root = arena.insert_root(Grid::solved(3).unwrap());
        let child = arena.apply_move(root, Direction::Up).unwrap();
        assert_eq!(arena.get(child).parent(), Some(root));
        assert_eq!(arena.get(child).producing_move(), Some(Direction::Up));
        assert!(arena.apply_move(root, Direction::Down).is_none());
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_expand_never_leaves_grid() {
        for size in 2..=4 {
            let mut arena = StateArena::new();
            let root = arena.insert_root(Grid::solved(size).unwrap());
            let mut frontier = vec![root];
            for _ in 0..3 {
                let mut next = Vec::new();
                for id in frontier {
                    let children = arena.expand(id, &[]);
                    assert!(!children.is_empty() && children.len() <= 4);
                    for child in &children {
                        let (r, c) = arena.grid(*child).blank();
                        assert!(r < size && c < size);
                    }
                    next.extend(children);
                }
                frontier = next;
            }
        }
    }

    #[test]
    fn test_expand_honours_exclusions_and_order() {
        let mut arena = StateArena::new();
        let root = arena.insert_root(Grid::solved(3).unwrap());
        let center = arena.apply_move(root, Direction::Left).unwrap();
        let center = arena.apply_move(center, Direction::Up).unwrap();

        let all = arena.expand(center, &[]);
        let moves: Vec<_> = all.iter().map(|id| arena.get(*id).producing_move().unwrap()).collect();
        assert_eq!(moves, Direction::ALL.to_vec());

        let some = arena.expand(center, &[Direction::Up, Direction::Down]);
        let moves: Vec<_> = some
            .iter()
            .map(|id| arena.get(*id).producing_move().unwrap())
            .collect();
        assert_eq!(moves, vec![Direction::Left, Direction::Right]);
    }

    #[test]
    fn test_ancestors_and_path() {
        let mut arena = StateArena::new();
        let root = arena.insert_root(Grid::solved(3).unwrap());
        let a = arena.apply_move(root, Direction::Left).unwrap();
        let b = arena.apply_move(a, Direction::Up).unwrap();
        let c = arena.apply_move(b, Direction::Right).unwrap();

        assert_eq!(arena.ancestors(c).collect::<Vec<_>>(), vec![b, a, root]);
        assert_eq!(arena.path_to(c), vec![root, a, b, c]);

        let back = arena.apply_move(c, Direction::Left).unwrap();
        assert!(arena.has_ancestor_grid(c, arena.grid(back)));
        assert!(!arena.has_ancestor_grid(c, arena.grid(c)));
    }

    #[test]
    fn test_steps_to_reports_clicked_tiles() {
        let mut arena = StateArena::new();
        let root = arena.insert_root(Grid::solved(3).unwrap());
        let a = arena.apply_move(root, Direction::Left).unwrap();
        let b = arena.apply_move(a, Direction::Up).unwrap();

        let steps = arena.steps_to(b).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].clicked(), 8);
        assert_eq!(steps[1].clicked(), 5);
        assert_eq!(steps[1].resulting(), arena.grid(b));
        assert!(arena.steps_to(root).unwrap().is_empty());
    }

    #[test]
    fn test_equality_uses_grid_only() {
        let mut arena = StateArena::new();
        let root = arena.insert_root(Grid::solved(3).unwrap());
        let a = arena.apply_move(root, Direction::Up).unwrap();
        let back = arena.apply_move(a, Direction::Down).unwrap();

        assert_eq!(arena.get(root), arena.get(back));
        let set: HashSet<&PuzzleState> = [arena.get(root), arena.get(back)].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_truncate_releases_recent_states() {
        let mut arena = StateArena::new();
        let root = arena.insert_root(Grid::solved(3).unwrap());
        let mark = arena.len();
        arena.expand(root, &[]);
        assert_eq!(arena.len(), 3);
        arena.truncate(mark);
        assert_eq!(arena.len(), 1);
    }
}
