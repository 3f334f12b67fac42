use grid_planner::{Move, ObstacleGrid, Planner};
use grid_util::grid::Grid;
use grid_util::point::Point;
use grid_util::rect::Rect;

// An agent follows the planner one move per tick across a 10x10 grid with
// a few rectangular obstacles, printing each step of the walk.

fn main() {
    let mut obstacle_grid: ObstacleGrid = ObstacleGrid::new(10, 10, false);
    obstacle_grid.set_rectangle(&Rect::new(1, 1, 2, 2), true);
    obstacle_grid.set_rectangle(&Rect::new(5, 0, 2, 2), true);
    obstacle_grid.set_rectangle(&Rect::new(0, 5, 2, 2), true);
    obstacle_grid.generate_components();
    println!("{}", obstacle_grid);
    let goal = Point::new(9, 9);
    let mut planner = Planner::new(goal, &obstacle_grid);
    let mut position = Point::new(0, 0);
    let mut tick = 0;
    loop {
        let step = planner.next_move(position);
        if step == Move::Stay {
            break;
        }
        position = step.apply(position);
        tick += 1;
        println!("tick {}: {:?} -> {}", tick, step, position);
    }
}
