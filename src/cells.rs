use serde_derive::Serialize;
use smallvec::SmallVec;

use crate::units::{Height, Width};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Serialize)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}

impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(x_y_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

/// North is -y, South is +y: rows grow downward, matching row-major `[row][col]` addressing.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [
        CompassPrimary::North,
        CompassPrimary::South,
        CompassPrimary::East,
        CompassPrimary::West,
    ];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// Wall flags for one cell, all present until a passage is carved.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize)]
pub struct Walls {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl Walls {
    pub fn intact() -> Walls {
        Walls {
            north: true,
            south: true,
            east: true,
            west: true,
        }
    }

    pub fn is_present(&self, dir: CompassPrimary) -> bool {
        match dir {
            CompassPrimary::North => self.north,
            CompassPrimary::South => self.south,
            CompassPrimary::East => self.east,
            CompassPrimary::West => self.west,
        }
    }

    pub(crate) fn clear(&mut self, dir: CompassPrimary) {
        match dir {
            CompassPrimary::North => self.north = false,
            CompassPrimary::South => self.south = false,
            CompassPrimary::East => self.east = false,
            CompassPrimary::West => self.west = false,
        }
    }
}

impl Default for Walls {
    fn default() -> Walls {
        Walls::intact()
    }
}

/// One grid square. `visited` is only meaningful while a generator runs.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize)]
pub struct Cell {
    pub coord: GridCoordinate,
    pub walls: Walls,
    pub visited: bool,
}

impl Cell {
    pub(crate) fn new(coord: GridCoordinate) -> Cell {
        Cell {
            coord,
            walls: Walls::intact(),
            visited: false,
        }
    }
}

/// Coordinate one step away in `dir`, or `None` past the grid edge.
pub fn offset_coordinate(
    coord: GridCoordinate,
    dir: CompassPrimary,
    width: Width,
    height: Height,
) -> Option<GridCoordinate> {
    let (x, y) = (coord.x, coord.y);
    let (Width(w), Height(h)) = (width, height);
    match dir {
        CompassPrimary::North => {
            if y > 0 {
                Some(GridCoordinate { x, y: y - 1 })
            } else {
                None
            }
        }
        CompassPrimary::South => {
            if (y as usize) + 1 < h {
                Some(GridCoordinate { x, y: y + 1 })
            } else {
                None
            }
        }
        CompassPrimary::East => {
            if (x as usize) + 1 < w {
                Some(GridCoordinate { x: x + 1, y })
            } else {
                None
            }
        }
        CompassPrimary::West => {
            if x > 0 {
                Some(GridCoordinate { x: x - 1, y })
            } else {
                None
            }
        }
    }
}

/// The direction from `a` to `b`, or `None` when the cells are not 4-connected neighbours.
pub fn direction_between(a: GridCoordinate, b: GridCoordinate) -> Option<CompassPrimary> {
    let dx = i64::from(b.x) - i64::from(a.x);
    let dy = i64::from(b.y) - i64::from(a.y);
    match (dx, dy) {
        (0, -1) => Some(CompassPrimary::North),
        (0, 1) => Some(CompassPrimary::South),
        (1, 0) => Some(CompassPrimary::East),
        (-1, 0) => Some(CompassPrimary::West),
        _ => None,
    }
}

pub fn manhattan_distance(a: GridCoordinate, b: GridCoordinate) -> u32 {
    let dx = if a.x > b.x { a.x - b.x } else { b.x - a.x };
    let dy = if a.y > b.y { a.y - b.y } else { b.y - a.y };
    dx + dy
}
