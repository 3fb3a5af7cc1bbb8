//! Renderer and gameplay facing transforms over a generated maze: flatten
//! wall flags into world-space segment descriptors, sample spawn cells, map
//! grid routes into world coordinates.

use std::f32::consts::FRAC_PI_2;

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_derive::Serialize;

use crate::cells::GridCoordinate;
use crate::maze::Maze;
use crate::units::{CellSize, Height, Width};

/// Which world axis a wall segment runs along. North/south walls span X,
/// east/west walls span Z.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum WallOrientation {
    AlongX,
    AlongZ,
}

impl WallOrientation {
    pub fn rotation_radians(self) -> f32 {
        match self {
            WallOrientation::AlongX => 0.0,
            WallOrientation::AlongZ => FRAC_PI_2,
        }
    }
}

/// Midpoint and orientation of one physical wall, in world units.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct WallSegment {
    pub x: f32,
    pub z: f32,
    pub orientation: WallOrientation,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct WorldPosition {
    pub x: f32,
    pub z: f32,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SpawnOptions {
    pub exclude_start: bool,
    pub exclude_goal: bool,
}

impl Default for SpawnOptions {
    fn default() -> SpawnOptions {
        SpawnOptions {
            exclude_start: true,
            exclude_goal: true,
        }
    }
}

/// Every physical wall of the maze exactly once. Interior walls are emitted
/// by the cell owning the north/west flag; the south and east boundaries come
/// from the bottom row and rightmost column.
pub fn wall_segments(maze: &Maze, cell_size: CellSize) -> Vec<WallSegment> {
    let CellSize(size) = cell_size;
    let (Width(width), Height(height)) = (maze.width(), maze.height());
    let mut segments = Vec::new();

    for (y, x) in (0..height).cartesian_product(0..width) {
        let cell = maze
            .cell(GridCoordinate::new(x as u32, y as u32))
            .expect("layout sweep stays in bounds");
        let world_x = x as f32 * size;
        let world_z = y as f32 * size;

        if cell.walls.north {
            segments.push(WallSegment {
                x: world_x + size / 2.0,
                z: world_z,
                orientation: WallOrientation::AlongX,
            });
        }
        if y == height - 1 && cell.walls.south {
            segments.push(WallSegment {
                x: world_x + size / 2.0,
                z: world_z + size,
                orientation: WallOrientation::AlongX,
            });
        }
        if cell.walls.west {
            segments.push(WallSegment {
                x: world_x,
                z: world_z + size / 2.0,
                orientation: WallOrientation::AlongZ,
            });
        }
        if x == width - 1 && cell.walls.east {
            segments.push(WallSegment {
                x: world_x + size,
                z: world_z + size / 2.0,
                orientation: WallOrientation::AlongZ,
            });
        }
    }

    segments
}

/// Sample up to `count` distinct cells for hostile spawns: shuffle the
/// candidate cells and take from the front. The 2x2 region around the player
/// start never spawns anything; the start and goal corners are excluded per
/// `options`. Deterministic for a fixed rng.
pub fn spawn_cells<R: Rng + ?Sized>(
    maze: &Maze,
    count: usize,
    options: &SpawnOptions,
    rng: &mut R,
) -> Vec<GridCoordinate> {
    let (Width(width), Height(height)) = (maze.width(), maze.height());
    let start = GridCoordinate::new(0, 0);
    let goal = GridCoordinate::new(width as u32 - 1, height as u32 - 1);

    let mut candidates: Vec<GridCoordinate> = maze
        .iter()
        .filter(|&coord| !(options.exclude_start && coord == start))
        .filter(|&coord| !(options.exclude_goal && coord == goal))
        .filter(|&coord| !(coord.x < 2 && coord.y < 2))
        .collect();

    candidates.shuffle(rng);
    candidates.truncate(count);
    candidates
}

/// `spawn_cells` mapped to world-space cell centres.
pub fn spawn_positions<R: Rng + ?Sized>(
    maze: &Maze,
    cell_size: CellSize,
    count: usize,
    options: &SpawnOptions,
    rng: &mut R,
) -> Vec<WorldPosition> {
    spawn_cells(maze, count, options, rng)
        .into_iter()
        .map(|coord| cell_centre(coord, cell_size))
        .collect()
}

pub fn cell_centre(coord: GridCoordinate, cell_size: CellSize) -> WorldPosition {
    let CellSize(size) = cell_size;
    WorldPosition {
        x: coord.x as f32 * size + size / 2.0,
        z: coord.y as f32 * size + size / 2.0,
    }
}

/// World-space waypoints for a found path, for the auto-navigate consumer.
pub fn path_to_world(path: &[GridCoordinate], cell_size: CellSize) -> Vec<WorldPosition> {
    path.iter()
        .map(|&coord| cell_centre(coord, cell_size))
        .collect()
}
