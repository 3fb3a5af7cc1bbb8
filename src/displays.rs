use fnv::FnvHashSet;

use crate::cells::GridCoordinate;
use crate::maze::Maze;

/// Hook filling the 3-character body of a cell in a text rendering.
pub trait CellAnnotation {
    fn cell_body(&self, coord: GridCoordinate) -> String;
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> PathDisplay {
        PathDisplay {
            on_path_coordinates: path.iter().copied().collect(),
        }
    }
}

impl CellAnnotation for PathDisplay {
    fn cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndDisplay {
    start: GridCoordinate,
    end: GridCoordinate,
}

impl StartEndDisplay {
    pub fn new(start: GridCoordinate, end: GridCoordinate) -> StartEndDisplay {
        StartEndDisplay { start, end }
    }
}

impl CellAnnotation for StartEndDisplay {
    fn cell_body(&self, coord: GridCoordinate) -> String {
        if coord == self.start {
            String::from(" S ")
        } else if coord == self.end {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// Draw the maze as `+`/`---`/`|` ASCII walls, one text row of wall and one of
/// cell bodies per grid row. Walls are read straight off each cell's own
/// flags; the symmetry invariant keeps the two sides of a pair in agreement.
pub fn render(maze: &Maze, annotation: Option<&dyn CellAnnotation>) -> String {
    let width = maze.width().0;
    let height = maze.height().0;
    // per grid row: one wall line + one body line, each roughly 4 chars a cell
    let mut output = String::with_capacity((height * 2 + 1) * (width * 4 + 2));

    for y in 0..height {
        // north walls of this row
        output.push('+');
        for x in 0..width {
            let cell = maze
                .cell(GridCoordinate::new(x as u32, y as u32))
                .expect("render sweep stays in bounds");
            output.push_str(if cell.walls.north { "---+" } else { "   +" });
        }
        output.push('\n');

        // west walls and cell bodies, then the row's final east wall
        let mut last_east_wall = true;
        for x in 0..width {
            let coord = GridCoordinate::new(x as u32, y as u32);
            let cell = maze.cell(coord).expect("render sweep stays in bounds");
            output.push(if cell.walls.west { '|' } else { ' ' });
            match annotation {
                Some(hook) => output.push_str(&hook.cell_body(coord)),
                None => output.push_str("   "),
            }
            last_east_wall = cell.walls.east;
        }
        output.push(if last_east_wall { '|' } else { ' ' });
        output.push('\n');
    }

    // south boundary from the bottom row's flags
    output.push('+');
    for x in 0..width {
        let cell = maze
            .cell(GridCoordinate::new(x as u32, height as u32 - 1))
            .expect("render sweep stays in bounds");
        output.push_str(if cell.walls.south { "---+" } else { "   +" });
    }
    output.push('\n');

    output
}

pub fn render_plain(maze: &Maze) -> String {
    render(maze, None)
}
