use std::fmt;

use error_chain::bail;

use crate::cells::{
    direction_between, offset_coordinate, Cell, CompassPrimary, CoordinateSmallVec, GridCoordinate,
};
use crate::displays;
use crate::errors::*;
use crate::units::{Height, Width};

/// A rectangular grid of wall-flagged cells, addressed row-major (row = y, col = x).
///
/// Only generators mutate a maze; once generated, consumers read it through the
/// immutable query methods and the wall symmetry invariant holds: the two flags
/// of every adjacent cell pair always agree.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Maze {
    width: Width,
    height: Height,
    cells: Vec<Cell>,
}

impl Maze {
    /// A fully walled, unvisited maze. Zero width or height is a caller
    /// contract violation and fails fast, as does a cell count beyond the
    /// u32 coordinate range.
    pub fn new(width: Width, height: Height) -> Result<Maze> {
        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 {
            bail!(ErrorKind::InvalidDimensions(w, h));
        }
        let cells_count = match w.checked_mul(h) {
            Some(n) if n <= u32::MAX as usize => n,
            _ => bail!(ErrorKind::GridTooLarge(w.saturating_mul(h))),
        };

        let mut cells = Vec::with_capacity(cells_count);
        for y in 0..h {
            for x in 0..w {
                cells.push(Cell::new(GridCoordinate::new(x as u32, y as u32)));
            }
        }

        Ok(Maze {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn size(&self) -> usize {
        self.width.0 * self.height.0
    }

    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        if self.is_valid_coordinate(coord) {
            Some(&self.cells[self.cell_index(coord)])
        } else {
            None
        }
    }

    fn cell_index(&self, coord: GridCoordinate) -> usize {
        coord.y as usize * self.width.0 + coord.x as usize
    }

    /// Cells to the North, South, East or West of `coord`, bounds checked,
    /// regardless of any wall between them.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    pub fn neighbour_at_direction(
        &self,
        coord: GridCoordinate,
        dir: CompassPrimary,
    ) -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        offset_coordinate(coord, dir, self.width, self.height)
    }

    /// Neighbours not yet visited by a running generator.
    pub fn unvisited_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        self.neighbours(coord)
            .iter()
            .copied()
            .filter(|&c| !self.cells[self.cell_index(c)].visited)
            .collect()
    }

    pub(crate) fn mark_visited(&mut self, coord: GridCoordinate) {
        let index = self.cell_index(coord);
        self.cells[index].visited = true;
    }

    /// Clear the shared wall pair between two adjacent cells. Both facing
    /// flags drop in the same operation, keeping the symmetry invariant.
    /// Non-adjacent or out-of-grid arguments are ignored.
    pub fn carve_passage(&mut self, a: GridCoordinate, b: GridCoordinate) {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return;
        }
        if let Some(dir) = direction_between(a, b) {
            let a_index = self.cell_index(a);
            let b_index = self.cell_index(b);
            self.cells[a_index].walls.clear(dir);
            self.cells[b_index].walls.clear(dir.opposite());
        }
    }

    /// Is there an open passage leaving `coord` in `dir`? Bounds checked; the
    /// symmetry invariant makes inspecting this cell's own flag sufficient.
    pub fn is_passage(&self, coord: GridCoordinate, dir: CompassPrimary) -> bool {
        match (self.cell(coord), self.neighbour_at_direction(coord, dir)) {
            (Some(cell), Some(_)) => !cell.walls.is_present(dir),
            _ => false,
        }
    }

    /// Are two adjacent cells connected by a passage?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        direction_between(a, b).map_or(false, |dir| self.is_passage(a, dir))
    }

    /// Neighbours reachable in one step: adjacent and not walled off.
    pub fn walkable_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter(|&&dir| self.is_passage(coord, dir))
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    /// Number of cleared wall pairs. Each interior pair is counted once via
    /// its east/south owner. A spanning-tree maze has exactly `size() - 1`.
    pub fn passages_count(&self) -> usize {
        let (Width(w), Height(h)) = (self.width, self.height);
        self.cells
            .iter()
            .map(|cell| {
                let mut cleared = 0;
                if (cell.coord.x as usize) + 1 < w && !cell.walls.east {
                    cleared += 1;
                }
                if (cell.coord.y as usize) + 1 < h && !cell.walls.south {
                    cleared += 1;
                }
                cleared
            })
            .sum()
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            width: self.width.0,
            cells_count: self.size(),
        }
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", displays::render_plain(self))
    }
}

/// Row-major walk over every cell coordinate.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    width: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = GridCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let y = self.current_cell_number / self.width;
            let x = self.current_cell_number - y * self.width;
            self.current_cell_number += 1;
            Some(GridCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

impl<'a> IntoIterator for &'a Maze {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
