use grid_planner::{find_path, reconstruct, ObstacleGrid};
use grid_util::grid::Grid;
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Cells have a 4-neighborhood

fn main() {
    let mut obstacle_grid: ObstacleGrid = ObstacleGrid::new(3, 3, false);
    obstacle_grid.set(1, 1, true);
    obstacle_grid.generate_components();
    println!("{}", obstacle_grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let tree = find_path(start, end, &obstacle_grid).unwrap();
    println!("Moves:");
    for step in reconstruct(tree.terminal()) {
        println!("{:?}", step);
    }
}
