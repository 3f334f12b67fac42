use std::collections::VecDeque;

use grid_util::point::Point;
use log::debug;

use crate::astar::find_path;
use crate::moves::{reconstruct, Move};
use crate::GridQuery;

/// Replays shortest paths towards a fixed goal, one move per decision tick.
///
/// The planner owns a pending-move queue which it refills by running a full
/// search whenever it is exhausted. A failed search leaves the queue empty
/// and the caller receives [Move::Stay]; nothing about the failure is
/// remembered, so a persistently unreachable goal is searched for again on
/// every tick. Each planner is an independent value; multiple agents get
/// their own.
pub struct Planner<G> {
    goal: Point,
    grid: G,
    pending: VecDeque<Move>,
}

impl<G: GridQuery> Planner<G> {
    /// Creates a planner that routes towards `goal` on `grid`.
    pub fn new(goal: Point, grid: G) -> Planner<G> {
        Planner {
            goal,
            grid,
            pending: VecDeque::new(),
        }
    }

    /// The fixed target cell.
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Number of moves still queued from the last computed path.
    pub fn pending_moves(&self) -> usize {
        self.pending.len()
    }

    /// Returns the next move towards the goal from `current`.
    ///
    /// Standing on the goal yields [Move::Stay] without running a search.
    /// Otherwise an empty queue triggers a fresh search and reconstruction
    /// before the front move is handed out.
    pub fn next_move(&mut self, current: Point) -> Move {
        if current == self.goal {
            return Move::Stay;
        }
        if self.pending.is_empty() {
            debug!("Move queue exhausted, searching from {} to {}", current, self.goal);
            self.pending = match find_path(current, self.goal, &self.grid) {
                Some(tree) => reconstruct(tree.terminal()).into(),
                None => VecDeque::new(),
            };
        }
        self.pending.pop_front().unwrap_or(Move::Stay)
    }
}
