use grid_planner::{ObstacleGrid, Planner};
use grid_util::grid::Grid;
use grid_util::point::Point;

// The goal is walled off on all four sides, so every tick re-runs a failing
// search and the planner hands out the stay move.

fn main() {
    let mut obstacle_grid: ObstacleGrid = ObstacleGrid::new(5, 5, false);
    for (x, y) in [(3, 2), (2, 3), (4, 3), (3, 4)] {
        obstacle_grid.set(x, y, true);
    }
    obstacle_grid.generate_components();
    println!("{}", obstacle_grid);
    let start = Point::new(0, 0);
    let goal = Point::new(3, 3);
    let mut planner = Planner::new(goal, &obstacle_grid);
    for tick in 0..3 {
        println!("tick {}: {:?}", tick, planner.next_move(start));
    }
    println!("goal reachable: {}", obstacle_grid.reachable(&start, &goal));
}
