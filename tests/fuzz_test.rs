//! Fuzzes the planning pipeline by checking for many random grids that a
//! path is found exactly when the goal is reachable by being part of the
//! same connected component, that found paths are optimal according to a
//! reference breadth-first search, and that replaying the reconstructed
//! moves walks passable cells only.
use grid_planner::{find_path, reconstruct, GridQuery, Move, ObstacleGrid, Planner};
use grid_util::grid::Grid;
use grid_util::point::Point;
use rand::prelude::*;
use std::collections::{HashMap, VecDeque};

fn random_grid(n: usize, rng: &mut StdRng) -> ObstacleGrid {
    let mut obstacle_grid: ObstacleGrid = ObstacleGrid::new(n, n, false);
    for x in 0..obstacle_grid.width() {
        for y in 0..obstacle_grid.height() {
            obstacle_grid.set(x, y, rng.gen_bool(0.4))
        }
    }
    obstacle_grid.generate_components();
    obstacle_grid
}

fn visualize_grid(grid: &ObstacleGrid, start: &Point, end: &Point) {
    let grid = &grid.grid;
    for y in 0..grid.height {
        for x in 0..grid.width {
            let p = Point::new(x as i32, y as i32);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.get(x, y) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Reference shortest-path length by breadth-first search.
fn bfs_distance(grid: &ObstacleGrid, start: Point, goal: Point) -> Option<i32> {
    if start == goal {
        return Some(0);
    }
    let mut distances: HashMap<Point, i32> = HashMap::new();
    let mut queue = VecDeque::new();
    distances.insert(start, 0);
    queue.push_back(start);
    while let Some(position) = queue.pop_front() {
        let distance = distances[&position];
        for step in Move::CARDINAL {
            let next = step.apply(position);
            if grid.is_obstacle(next) || distances.contains_key(&next) {
                continue;
            }
            if next == goal {
                return Some(distance + 1);
            }
            distances.insert(next, distance + 1);
            queue.push_back(next);
        }
    }
    None
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut random_grid = random_grid(N, &mut rng);
        random_grid.set(0, 0, false);
        random_grid.set(N - 1, N - 1, false);
        let reachable = random_grid.reachable(&start, &end);
        let tree = find_path(start, end, &random_grid);
        // Show the grid if a path is not found
        if tree.is_some() != reachable {
            visualize_grid(&random_grid, &start, &end);
        }
        assert!(tree.is_some() == reachable);
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 8;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut random_grid = random_grid(N, &mut rng);
        random_grid.set(0, 0, false);
        random_grid.set(N - 1, N - 1, false);
        if let Some(tree) = find_path(start, end, &random_grid) {
            let expected = bfs_distance(&random_grid, start, end).unwrap();
            if tree.terminal().cost_so_far() != expected {
                visualize_grid(&random_grid, &start, &end);
            }
            assert_eq!(tree.terminal().cost_so_far(), expected);

            let moves = reconstruct(tree.terminal());
            assert_eq!(moves.len() as i32, expected);
            let mut position = start;
            for step in &moves {
                position = step.apply(position);
                assert!(!random_grid.is_obstacle(position));
            }
            assert_eq!(position, end);
        }
    }
}

#[test]
fn fuzz_planner() {
    const N: usize = 8;
    const N_GRIDS: usize = 200;
    let mut rng = StdRng::seed_from_u64(1);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut random_grid = random_grid(N, &mut rng);
        random_grid.set(0, 0, false);
        random_grid.set(N - 1, N - 1, false);
        let mut planner = Planner::new(end, &random_grid);
        match bfs_distance(&random_grid, start, end) {
            Some(distance) => {
                let mut position = start;
                for _ in 0..distance {
                    position = planner.next_move(position).apply(position);
                }
                assert_eq!(position, end);
                assert_eq!(planner.next_move(position), Move::Stay);
            }
            None => {
                assert_eq!(planner.next_move(start), Move::Stay);
                assert_eq!(planner.next_move(start), Move::Stay);
            }
        }
    }
}
