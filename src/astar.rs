//! A* search over a uniform-cost grid. The generic [astar] core keeps a
//! single owned record per discovered position inside an [IndexMap], so the
//! open frontier can never hold two nodes for the same cell; a cheaper route
//! to an open position replaces the stale record and pushes a fresh heap
//! entry, while entries made stale that way are skipped when popped.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use log::warn;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use std::hash::Hash;

use grid_util::point::Point;

use crate::{GridQuery, Move};

/// Parent index marking the root of a search tree.
const NO_PARENT: usize = usize::MAX;

/// Manhattan distance between two cells, the admissible (and consistent)
/// heuristic for 4-directional unit-cost movement.
pub fn manhattan(a: &Point, b: &Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

struct FrontierEntry<C> {
    estimated_cost: C,
    cost: C,
    index: usize,
}

impl<C: PartialEq> Eq for FrontierEntry<C> {}

impl<C: PartialEq> PartialEq for FrontierEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.cost.eq(&other.cost)
    }
}

impl<C: Ord> PartialOrd for FrontierEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for FrontierEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then creates subordering based on
        // accumulated cost, favoring exploration of nodes closer to the goal
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => self.cost.cmp(&other.cost),
            s => s,
        }
    }
}

/// The single owned record kept per discovered position.
struct NodeRecord<C> {
    parent: usize,
    cost: C,
    heuristic: C,
    closed: bool,
}

/// The node arena produced by a successful search. Owns every node the
/// search discovered; [terminal](SearchTree::terminal) is the goal node
/// whose parent chain encodes the full path.
pub struct SearchTree<N, C> {
    nodes: FxIndexMap<N, NodeRecord<C>>,
    terminal: usize,
}

impl<N: Eq + Hash, C: Zero + Ord + Copy> SearchTree<N, C> {
    /// The goal node reached by the search.
    pub fn terminal(&self) -> PathNode<'_, N, C> {
        PathNode {
            tree: self,
            index: self.terminal,
        }
    }

    /// Number of distinct positions discovered during the search.
    pub fn discovered(&self) -> usize {
        self.nodes.len()
    }
}

/// Handle to a vertex of a [SearchTree]: its position, accumulated cost,
/// heuristic estimate and a non-owning link to the node it was discovered
/// from. Copyable; all storage stays with the tree.
pub struct PathNode<'a, N, C> {
    tree: &'a SearchTree<N, C>,
    index: usize,
}

impl<N, C> Clone for PathNode<'_, N, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, C> Copy for PathNode<'_, N, C> {}

impl<'a, N: Eq + Hash, C: Zero + Ord + Copy> PathNode<'a, N, C> {
    fn record(&self) -> (&'a N, &'a NodeRecord<C>) {
        // The index is always valid: handles are only created from tree
        // entries.
        self.tree.nodes.get_index(self.index).unwrap()
    }

    pub fn position(&self) -> &'a N {
        self.record().0
    }

    /// Accumulated path cost from the search root.
    pub fn cost_so_far(&self) -> C {
        self.record().1.cost
    }

    /// Estimated remaining cost to the goal.
    pub fn heuristic(&self) -> C {
        self.record().1.heuristic
    }

    /// Total priority the search ordered this node by.
    pub fn total_cost(&self) -> C {
        let record = self.record().1;
        record.cost + record.heuristic
    }

    pub fn parent(&self) -> Option<PathNode<'a, N, C>> {
        let parent = self.record().1.parent;
        (parent != NO_PARENT).then(|| PathNode {
            tree: self.tree,
            index: parent,
        })
    }
}

/// Runs an A* search from `start` to `goal` over the four axis-aligned
/// moves, treating every edge as unit cost. Returns the tree whose
/// [terminal](SearchTree::terminal) is the goal node of a minimum-cost
/// path, or [None] if the frontier empties without reaching the goal.
/// Failure is not cached: calling again with the same arguments redoes the
/// full search.
pub fn find_path<G: GridQuery>(
    start: Point,
    goal: Point,
    grid: &G,
) -> Option<SearchTree<Point, i32>> {
    astar(
        &start,
        |node| passable_neighborhood(grid, node),
        |point| manhattan(point, &goal),
        |point| *point == goal,
    )
}

/// The passable cells adjacent to `pos` in expansion order, with unit move
/// cost. The grid is queried for every candidate, including positions that
/// may lie beyond the map edge.
fn passable_neighborhood<G: GridQuery>(grid: &G, pos: &Point) -> Vec<(Point, i32)> {
    let pos = *pos;
    Move::CARDINAL
        .into_iter()
        .map(|step| step.apply(pos))
        .filter(|p| !grid.is_obstacle(*p))
        .map(|p| (p, 1))
        .collect::<Vec<_>>()
}

pub(crate) fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<SearchTree<N, C>>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let root_heuristic = heuristic(start);
    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry {
        estimated_cost: root_heuristic,
        cost: Zero::zero(),
        index: 0,
    });
    let mut nodes: FxIndexMap<N, NodeRecord<C>> = FxIndexMap::default();
    nodes.insert(
        start.clone(),
        NodeRecord {
            parent: NO_PARENT,
            cost: Zero::zero(),
            heuristic: root_heuristic,
            closed: false,
        },
    );
    while let Some(FrontierEntry { cost, index, .. }) = frontier.pop() {
        let (reached_goal, stale) = {
            let (node, record) = nodes.get_index(index).unwrap();
            // An entry is stale if a cheaper route to its position was found
            // after it was pushed; the record already reflects that route.
            (success(node), cost > record.cost)
        };
        if reached_goal {
            return Some(SearchTree {
                nodes,
                terminal: index,
            });
        }
        if stale {
            continue;
        }
        nodes.get_index_mut(index).unwrap().1.closed = true;
        let expanded = {
            let (node, _) = nodes.get_index(index).unwrap();
            successors(node)
        };
        for (successor, move_cost) in expanded {
            let new_cost = cost + move_cost;
            let heuristic_value;
            let successor_index;
            match nodes.entry(successor) {
                Vacant(e) => {
                    heuristic_value = heuristic(e.key());
                    successor_index = e.index();
                    e.insert(NodeRecord {
                        parent: index,
                        cost: new_cost,
                        heuristic: heuristic_value,
                        closed: false,
                    });
                }
                Occupied(mut e) => {
                    // Closed positions are never reconsidered; open ones are
                    // replaced when the new route is strictly cheaper.
                    if !e.get().closed && e.get().cost > new_cost {
                        heuristic_value = e.get().heuristic;
                        successor_index = e.index();
                        e.insert(NodeRecord {
                            parent: index,
                            cost: new_cost,
                            heuristic: heuristic_value,
                            closed: false,
                        });
                    } else {
                        continue;
                    }
                }
            }
            frontier.push(FrontierEntry {
                estimated_cost: new_cost + heuristic_value,
                cost: new_cost,
                index: successor_index,
            });
        }
    }
    warn!("Frontier exhausted without reaching the goal");
    None
}
