//! Lowest-score search over oriented maze states.
//!
//! The search graph has one node per `(cell, facing)` pair. Moving forward
//! costs [`STEP_COST`](crate::maze::STEP_COST) and turning 90° in place costs
//! [`TURN_COST`](crate::maze::TURN_COST). [`min_cost`] answers "how cheap is
//! the best route", [`best_path_cells`] answers "which cells lie on any best
//! route".

use std::cmp::Reverse;
use std::collections::hash_map::Entry as MapEntry;
use std::collections::{BinaryHeap, VecDeque};
use std::time::Instant;

use arrayvec::ArrayVec;
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::MazeError;
use crate::maze::{Cost, Dir, Maze, Move, Pos, State};

/// Which goal facings seed the backward walk over recorded parents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GoalFacings {
    /// Every facing at the goal whose cost equals the optimum.
    #[default]
    AllOptimal,
    /// Only North and East. Misses best routes that arrive facing South or
    /// West; kept for comparison with older answers.
    NorthEast,
}

impl GoalFacings {
    fn dirs(self) -> &'static [Dir] {
        match self {
            GoalFacings::AllOptimal => &Dir::ALL,
            GoalFacings::NorthEast => &[Dir::North, Dir::East],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Drop turns that leave the reindeer facing a wall. Faster, but makes a
    /// 180° turn in a dead end impossible.
    pub prune_rotations: bool,
    pub goal_facings: GoalFacings,
}

/// Best known cost of a state and every predecessor that achieves it.
#[derive(Clone, Debug)]
struct Entry {
    cost: Cost,
    // a state has exactly three possible predecessors
    parents: ArrayVec<State, 3>,
}

struct Exploration {
    dist: FxHashMap<State, Entry>,
    best: Option<Cost>,
    goal: Option<State>,
    expanded: usize,
}

impl Exploration {
    fn parents(&self, state: &State) -> &[State] {
        self.dist.get(state).map(|entry| &entry.parents[..]).unwrap_or(&[])
    }

    /// Follows the first recorded parent back from the first goal reached.
    fn route(&self) -> Option<Vec<State>> {
        let mut state = self.goal?;
        let mut path = vec![state];
        while let Some(&parent) = self.parents(&state).first() {
            path.push(parent);
            state = parent;
        }
        path.reverse();
        Some(path)
    }

    /// Breadth-first walk over recorded parents from the optimal goal states.
    fn cells(&self, maze: &Maze, facings: GoalFacings, best: Cost) -> FxHashSet<Pos> {
        let mut queue = self.optimal_goal_states(maze, facings, best).collect::<VecDeque<_>>();
        if queue.is_empty() {
            tracing::warn!(best, facings = ?facings, "no goal facing reaches the optimum");
        }
        let mut visited = queue.iter().copied().collect::<FxHashSet<_>>();
        while let Some(state) = queue.pop_front() {
            for &parent in self.parents(&state) {
                if visited.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
        visited.into_iter().map(|state| state.pos).collect()
    }

    fn optimal_goal_states<'a>(
        &'a self,
        maze: &Maze,
        facings: GoalFacings,
        best: Cost,
    ) -> impl Iterator<Item = State> + 'a {
        let end = maze.end();
        facings
            .dirs()
            .iter()
            .map(move |&dir| State::new(end, dir))
            .filter(move |state| self.dist.get(state).is_some_and(|entry| entry.cost == best))
    }
}

fn successors(maze: &Maze, state: State, opts: SearchOptions) -> ArrayVec<(Cost, State), 3> {
    Move::ALL
        .into_iter()
        .filter_map(|mv| {
            let next = state.apply(mv)?;
            let blocked = match mv {
                Move::Forward => maze.is_wall(next.pos),
                Move::Clockwise | Move::CounterClockwise => {
                    opts.prune_rotations
                        && next.pos.step(next.dir).map_or(true, |ahead| maze.is_wall(ahead))
                }
            };
            (!blocked).then_some((mv.cost(), next))
        })
        .collect()
}

/// Dijkstra from the start state, keeping every equal-cost parent. Stops at
/// the first goal pop when `first_goal_only`, otherwise once the popped cost
/// exceeds the optimum.
fn explore(maze: &Maze, opts: SearchOptions, first_goal_only: bool) -> Exploration {
    let time = Instant::now();
    let start = maze.start_state();
    let mut dist: FxHashMap<State, Entry> = FxHashMap::default();
    dist.insert(start, Entry { cost: 0, parents: ArrayVec::new() });
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((0, start)));
    let mut closed: FxHashSet<State> = FxHashSet::default();
    let mut best = None;
    let mut goal = None;

    while let Some(Reverse((cost, state))) = frontier.pop() {
        if best.is_some_and(|best| cost > best) {
            break;
        }
        if !closed.insert(state) {
            continue;
        }
        let recorded = dist[&state].cost;
        assert!(
            cost == recorded,
            "popped {state:?} at cost {cost} but its recorded cost is {recorded}"
        );

        if state.pos == maze.end() && best.is_none() {
            best = Some(cost);
            goal = Some(state);
            if first_goal_only {
                break;
            }
        }

        for (step, next) in successors(maze, state, opts) {
            let next_cost = cost + step;
            match dist.entry(next) {
                MapEntry::Vacant(slot) => {
                    let mut parents = ArrayVec::new();
                    parents.push(state);
                    slot.insert(Entry { cost: next_cost, parents });
                    frontier.push(Reverse((next_cost, next)));
                }
                MapEntry::Occupied(mut slot) => {
                    let entry = slot.get_mut();
                    if next_cost < entry.cost {
                        entry.cost = next_cost;
                        entry.parents.clear();
                        entry.parents.push(state);
                        frontier.push(Reverse((next_cost, next)));
                    } else if next_cost == entry.cost && !entry.parents.contains(&state) {
                        entry.parents.push(state);
                    }
                }
            }
        }
    }

    tracing::trace!(elapsed = ?time.elapsed(), expanded = closed.len(), "explore");
    Exploration { dist, best, goal, expanded: closed.len() }
}

/// Lowest score from the start (facing East) to the end, or `None` when the
/// end cannot be reached.
pub fn min_cost(maze: &Maze) -> Option<Cost> {
    min_cost_with(maze, SearchOptions::default())
}

#[tracing::instrument(skip_all, fields(rows = maze.rows(), cols = maze.cols()))]
pub fn min_cost_with(maze: &Maze, opts: SearchOptions) -> Option<Cost> {
    let exploration = explore(maze, opts, true);
    tracing::debug!(best = ?exploration.best, expanded = exploration.expanded, "min_cost");
    exploration.best
}

/// Every cell that lies on at least one lowest-score route, start and end
/// included.
pub fn best_path_cells(maze: &Maze) -> Result<FxHashSet<Pos>, MazeError> {
    best_path_cells_with(maze, SearchOptions::default())
}

#[tracing::instrument(skip_all, fields(rows = maze.rows(), cols = maze.cols()))]
pub fn best_path_cells_with(maze: &Maze, opts: SearchOptions) -> Result<FxHashSet<Pos>, MazeError> {
    let exploration = explore(maze, opts, false);
    let best = exploration.best.ok_or(MazeError::Unreachable)?;
    let cells = exploration.cells(maze, opts.goal_facings, best);
    tracing::debug!(
        best,
        expanded = exploration.expanded,
        cells = cells.len(),
        "best_path_cells"
    );
    Ok(cells)
}

/// One lowest-score route, as the states visited from the start to the end.
pub fn best_path(maze: &Maze) -> Result<Vec<State>, MazeError> {
    best_path_with(maze, SearchOptions::default())
}

pub fn best_path_with(maze: &Maze, opts: SearchOptions) -> Result<Vec<State>, MazeError> {
    explore(maze, opts, true).route().ok_or(MazeError::Unreachable)
}

/// Both answers and one best route, taken from a single search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub cost: Cost,
    pub cells: FxHashSet<Pos>,
    pub path: Vec<State>,
}

pub fn solve(maze: &Maze) -> Result<Solution, MazeError> {
    solve_with(maze, SearchOptions::default())
}

#[tracing::instrument(skip_all, fields(rows = maze.rows(), cols = maze.cols()))]
pub fn solve_with(maze: &Maze, opts: SearchOptions) -> Result<Solution, MazeError> {
    let exploration = explore(maze, opts, false);
    let cost = exploration.best.ok_or(MazeError::Unreachable)?;
    let cells = exploration.cells(maze, opts.goal_facings, cost);
    let path = exploration.route().ok_or(MazeError::Unreachable)?;
    tracing::debug!(
        cost,
        expanded = exploration.expanded,
        cells = cells.len(),
        "solve"
    );
    Ok(Solution { cost, cells, path })
}

/// The moves that take each state of `path` to the next, or `None` if two
/// neighbouring states are not one move apart.
pub fn path_moves(path: &[State]) -> Option<Vec<Move>> {
    path.iter()
        .tuple_windows()
        .map(|(&from, &to)| Move::ALL.into_iter().find(|&mv| from.apply(mv) == Some(to)))
        .collect()
}

/// Replays `moves` from the start state and returns the accumulated cost and
/// the final state. Fails instead of wrapping if the cost leaves `Cost`.
pub fn walk_cost(
    maze: &Maze,
    moves: impl IntoIterator<Item = Move>,
) -> Result<(Cost, State), MazeError> {
    moves
        .into_iter()
        .enumerate()
        .try_fold((0 as Cost, maze.start_state()), |(cost, state), (step, mv)| match state.apply(mv) {
            Some(next) if !maze.is_wall(next.pos) => cost
                .checked_add(mv.cost())
                .map(|cost| (cost, next))
                .ok_or(MazeError::CostOverflow { step }),
            next => Err(MazeError::BlockedMove {
                step,
                pos: next.map_or(state.pos, |next| next.pos),
            }),
        })
}
