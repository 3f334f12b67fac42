//! # grid_planner
//!
//! Step-by-step navigation on uniform grids. An agent asks a [Planner] for
//! one move per decision tick; the planner computes shortest 4-directional
//! paths with [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) under
//! an admissible Manhattan heuristic and replays them move by move,
//! recomputing from scratch whenever the queued path runs out. Obstacle maps
//! track
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! so hosts can answer reachability questions without running a search.
mod astar;
mod moves;
mod planner;

pub use crate::astar::{find_path, manhattan, PathNode, SearchTree};
pub use crate::moves::{reconstruct, Move};
pub use crate::planner::Planner;

use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

use core::fmt;

/// Obstacle oracle consumed by the search.
///
/// The search performs no bounds checking of its own and probes one cell
/// beyond the known map whenever the agent stands at an edge, so
/// implementors must answer for any position; positions outside the map
/// count as obstacles.
pub trait GridQuery {
    fn is_obstacle(&self, position: Point) -> bool;
}

impl<T: GridQuery + ?Sized> GridQuery for &T {
    fn is_obstacle(&self, position: Point) -> bool {
        (**self).is_obstacle(position)
    }
}

/// [ObstacleGrid] maintains information about components using a [UnionFind]
/// structure in addition to the raw [bool] grid values in the [BoolGrid]
/// that determine whether a cell is blocked ([true]) or free ([false]).
/// Implements [Grid] by building on [BoolGrid].
#[derive(Clone, Debug)]
pub struct ObstacleGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for ObstacleGrid {
    fn default() -> ObstacleGrid {
        ObstacleGrid {
            grid: BoolGrid::default(),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }
}

impl ObstacleGrid {
    fn get_neighbours(&self, point: Point) -> Vec<Point> {
        Move::CARDINAL
            .into_iter()
            .map(|step| step.apply(point))
            .filter(|p| self.can_move_to(*p))
            .collect::<Vec<Point>>()
    }
    pub fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && !self.grid.get(pos.x as usize, pos.y as usize)
    }
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.grid.index_in_bounds(x as usize, y as usize)
    }
    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are on different components.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start.x, start.y) && self.in_bounds(goal.x, goal.y) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            if self.components.equiv(start_ix, goal_ix) {
                false
            } else {
                info!("{} and {} are not equivalent components", start_ix, goal_ix);
                true
            }
        } else {
            true
        }
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up grid neighbours to
    /// the same components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w {
            for y in 0..h {
                if !self.grid.get(x, y) {
                    let parent_ix = self.grid.get_ix(x, y);
                    let point = Point::new(x as i32, y as i32);
                    let neighbours = vec![
                        Point::new(point.x + 1, point.y),
                        Point::new(point.x, point.y + 1),
                    ]
                    .into_iter()
                    .filter(|p| self.grid.point_in_bounds(*p) && !self.grid.get_point(*p))
                    .map(|p| self.grid.get_ix(p.x as usize, p.y as usize))
                    .collect::<Vec<usize>>();
                    for ix in neighbours {
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl GridQuery for ObstacleGrid {
    fn is_obstacle(&self, position: Point) -> bool {
        !self.can_move_to(position)
    }
}

impl fmt::Display for ObstacleGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for y in 0..self.grid.height {
            let values = (0..self.grid.width)
                .map(|x| self.grid.get(x, y) as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}

impl Grid<bool> for ObstacleGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        ObstacleGrid {
            grid: BoolGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
        }
    }
    fn get(&self, x: usize, y: usize) -> bool {
        self.grid.get(x, y)
    }
    /// Updates a position on the grid. Joins newly connected components and
    /// flags the components as dirty if components are (potentially) broken
    /// apart into multiple.
    fn set(&mut self, x: usize, y: usize, blocked: bool) {
        let p = Point::new(x as i32, y as i32);
        if self.grid.get(x, y) != blocked && blocked {
            self.components_dirty = true;
        } else {
            for p in self.get_neighbours(p) {
                self.components.union(
                    self.grid.get_ix(x, y),
                    self.grid.get_ix(p.x as usize, p.y as usize),
                );
            }
        }
        self.grid.set(x, y, blocked);
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_generation() {
        let mut obstacle_grid = ObstacleGrid::new(3, 4, true);
        obstacle_grid.grid.set(1, 1, false);
        obstacle_grid.generate_components();
        assert!(!obstacle_grid.components.equiv(0, 4))
    }

    /// The corners stay connected around a blocked centre on a 4-grid.
    #[test]
    fn corners_connected_around_centre_obstacle() {
        // |S  |
        // | # |
        // |  G|
        //  ___
        let mut obstacle_grid: ObstacleGrid = ObstacleGrid::new(3, 3, false);
        obstacle_grid.set(1, 1, true);
        obstacle_grid.generate_components();
        let start = Point::new(0, 0);
        let end = Point::new(2, 2);
        assert!(obstacle_grid.reachable(&start, &end));
    }

    /// A full wall splits the grid into two components.
    #[test]
    fn wall_splits_components() {
        let mut obstacle_grid: ObstacleGrid = ObstacleGrid::new(3, 3, false);
        obstacle_grid.set(1, 0, true);
        obstacle_grid.set(1, 1, true);
        obstacle_grid.set(1, 2, true);
        obstacle_grid.update();
        assert!(obstacle_grid.unreachable(&Point::new(0, 1), &Point::new(2, 1)));
    }

    #[test]
    fn out_of_bounds_counts_as_obstacle() {
        let obstacle_grid = ObstacleGrid::new(2, 2, false);
        assert!(obstacle_grid.is_obstacle(Point::new(-1, 0)));
        assert!(obstacle_grid.is_obstacle(Point::new(0, -1)));
        assert!(obstacle_grid.is_obstacle(Point::new(2, 0)));
        assert!(obstacle_grid.is_obstacle(Point::new(0, 2)));
        assert!(!obstacle_grid.is_obstacle(Point::new(1, 1)));
    }
}
