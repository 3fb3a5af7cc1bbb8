use docopt::Docopt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_derive::Deserialize;

use gridmaze::{
    cells::GridCoordinate,
    displays::{self, PathDisplay, StartEndDisplay},
    generators,
    layout::{self, SpawnOptions},
    maze::Maze,
    pathing,
    units::{CellSize, Height, Width},
};

use std::{fs::File, io, io::prelude::*};

const USAGE: &str = "Gridmaze

Usage:
    gridmaze_driver -h | --help
    gridmaze_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--show-path [--start-x=<x> --start-y=<y> --end-x=<e1> --end-y=<e2>]] [--spawn-count=<n> [--allow-goal-spawns]] [--cell-size=<c>] [--text-out=<path>] [--save-walls=<path>]

Options:
    -h --help            Show this screen.
    --grid-size=<n>      The grid size is n * n.
    --grid-width=<w>     The grid width in a w*h grid [default: 20].
    --grid-height=<h>    The grid height in a w*h grid [default: 20].
    --seed=<s>           Seed the random generator for a reproducible maze and spawn sample.
    --show-path          Overlay the shortest route between the start and end cells on the text rendering.
    --start-x=<x>        x coordinate of the path start [default: 0].
    --start-y=<y>        y coordinate of the path start [default: 0].
    --end-x=<e1>         x coordinate of the path end. Defaults to the far corner.
    --end-y=<e2>         y coordinate of the path end. Defaults to the far corner.
    --spawn-count=<n>    Sample n cells for hostile spawn positions and print them.
    --allow-goal-spawns  Let the spawn sampler use the goal corner cell.
    --cell-size=<c>      World units per cell for wall and spawn export [default: 2.0].
    --text-out=<path>    Output file path for the textual rendering of the maze.
    --save-walls=<path>  Serialize the wall segments to a text file: line 1 is the segment count, then one `x z rotation` line per wall.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_start_x: i32,
    flag_start_y: i32,
    flag_end_x: Option<i32>,
    flag_end_y: Option<i32>,
    flag_spawn_count: Option<usize>,
    flag_allow_goal_spawns: bool,
    flag_cell_size: f32,
    flag_text_out: String,
    flag_save_walls: String,
}

mod errors {
    use error_chain::error_chain;

    error_chain! {
        links {
            Maze(gridmaze::errors::Error, gridmaze::errors::ErrorKind);
        }
        foreign_links {
            DocOptFailure(docopt::Error);
            Io(std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };

    let mut rng = match args.flag_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let maze = generators::generate_maze(Width(width), Height(height), &mut rng)
        .chain_err(|| "failed to generate the maze")?;

    let rendering = if args.flag_show_path {
        render_with_path(&maze, &args, width, height)
    } else {
        displays::render_plain(&maze)
    };

    if args.flag_text_out.is_empty() {
        println!("{}", rendering);
    } else {
        write_text_to_file(&rendering, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_save_walls.is_empty() {
        save_wall_segments(&maze, CellSize(args.flag_cell_size), &args.flag_save_walls)?;
    }

    if let Some(count) = args.flag_spawn_count {
        let options = SpawnOptions {
            exclude_start: true,
            exclude_goal: !args.flag_allow_goal_spawns,
        };
        let positions =
            layout::spawn_positions(&maze, CellSize(args.flag_cell_size), count, &options,
                                    &mut rng);
        for position in &positions {
            println!("spawn {} {}", position.x, position.z);
        }
    }

    Ok(())
}

/// Text rendering with the found route marked. If somehow there is no route
/// the generator failed to produce a perfect maze; fall back to plain start
/// and end markers.
fn render_with_path(maze: &Maze, args: &MazeArgs, width: usize, height: usize) -> String {
    let far_x = (width - 1) as i32;
    let far_y = (height - 1) as i32;
    let (start_x, start_y) = (args.flag_start_x, args.flag_start_y);
    let (end_x, end_y) = (args.flag_end_x.unwrap_or(far_x), args.flag_end_y.unwrap_or(far_y));

    match pathing::find_path(maze, start_x, start_y, end_x, end_y) {
        Some(path) => displays::render(maze, Some(&PathDisplay::new(&path))),
        None => {
            let clamp = |value: i32, length: usize| -> u32 {
                (i64::from(value)).clamp(0, length as i64 - 1) as u32
            };
            let start = GridCoordinate::new(clamp(start_x, width), clamp(start_y, height));
            let end = GridCoordinate::new(clamp(end_x, width), clamp(end_y, height));
            displays::render(maze, Some(&StartEndDisplay::new(start, end)))
        }
    }
}

fn save_wall_segments(maze: &Maze, cell_size: CellSize, file_path: &str) -> Result<()> {
    let segments = layout::wall_segments(maze, cell_size);

    let mut segment_data = String::new();
    segment_data.push_str(&segments.len().to_string());
    segment_data.push('\n');
    for segment in &segments {
        segment_data.push_str(&format!("{} {} {}\n",
                                       segment.x,
                                       segment.z,
                                       segment.orientation.rotation_radians()));
    }

    write_text_to_file(&segment_data, file_path)
        .chain_err(|| format!("Failed to write wall segments to text file {}", file_path))?;

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
