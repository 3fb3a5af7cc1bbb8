use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::maze::Maze;
use crate::units::{Height, Width};

/// Carve a perfect maze with the randomized depth-first ("recursive
/// backtracking") algorithm, run over an explicit stack so deep grids cannot
/// exhaust the call stack.
///
/// Start from `(0, 0)`; while the stack is non-empty look at the top cell,
/// pick one of its unvisited neighbours uniformly at random, knock the shared
/// wall pair down, mark it visited and push it. A cell with no unvisited
/// neighbours is popped. Every cell ends up visited exactly once, giving a
/// spanning tree over the grid graph: fully connected, no cycles.
///
/// Output depends only on the grid dimensions and the supplied `rng`; thread
/// a seeded generator through for reproducible mazes.
pub fn recursive_backtracker<R: Rng + ?Sized>(maze: &mut Maze, rng: &mut R) {
    let start = GridCoordinate::new(0, 0);
    maze.mark_visited(start);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let unvisited = maze.unvisited_neighbours(current);
        if let Some(&next) = unvisited.choose(rng) {
            maze.carve_passage(current, next);
            maze.mark_visited(next);
            stack.push(next);
        } else {
            stack.pop();
        }
    }
}

/// Build a fully walled maze and carve it in one go.
pub fn generate_maze<R: Rng + ?Sized>(width: Width, height: Height, rng: &mut R) -> Result<Maze> {
    let mut maze = Maze::new(width, height)?;
    recursive_backtracker(&mut maze, rng);
    Ok(maze)
}
