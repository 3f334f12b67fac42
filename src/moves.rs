use grid_util::point::Point;
use num_traits::Zero;

use crate::astar::PathNode;

/// A single step of the agent on the grid. [Stay](Move::Stay) is the safe
/// default handed out when there is no path to follow; the search itself
/// only ever produces the four axis-aligned moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
    Stay,
}

impl Move {
    /// The four axis-aligned moves, in expansion order.
    pub const CARDINAL: [Move; 4] = [Move::Left, Move::Right, Move::Up, Move::Down];

    /// Cell offset of the move; y grows downward.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
            Move::Up => (0, -1),
            Move::Down => (0, 1),
            Move::Stay => (0, 0),
        }
    }

    /// The cell reached by taking the move from `position`.
    pub fn apply(self, position: Point) -> Point {
        let (dx, dy) = self.offset();
        Point::new(position.x + dx, position.y + dy)
    }

    /// The move that transforms `from` into the adjacent cell `to`. The x
    /// delta is evaluated first, so a malformed diagonal pair resolves to
    /// the vertical move.
    pub fn between(from: &Point, to: &Point) -> Move {
        let mut step = Move::Stay;
        if to.x > from.x {
            step = Move::Right;
        }
        if to.x < from.x {
            step = Move::Left;
        }
        if to.y > from.y {
            step = Move::Down;
        }
        if to.y < from.y {
            step = Move::Up;
        }
        step
    }
}

/// Walks the parent chain of `terminal` back to the search root and returns
/// the moves needed to traverse the path forward, in execution order. Pure
/// function of the chain: calling it repeatedly yields the same sequence.
pub fn reconstruct<C: Zero + Ord + Copy>(terminal: PathNode<'_, Point, C>) -> Vec<Move> {
    let mut moves: Vec<Move> = itertools::unfold(terminal, |node| {
        let parent = node.parent()?;
        let step = Move::between(parent.position(), node.position());
        *node = parent;
        Some(step)
    })
    .collect();
    moves.reverse();
    moves
}
