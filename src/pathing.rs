use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::BinaryHeap;
use std::hash::BuildHasherDefault;

use fnv::{FnvHashMap, FnvHashSet};

use crate::cells::{manhattan_distance, GridCoordinate};
use crate::maze::Maze;

/// One A* search node. Nodes live in a per-call arena and refer to the node
/// they were reached from by arena index, so the transient parent tree needs
/// no owned links and is dropped wholesale when the search returns.
#[derive(Debug, Copy, Clone)]
struct SearchNode {
    coord: GridCoordinate,
    g: u32,
    f: u32,
    parent: Option<usize>,
}

/// Shortest route between two cells as an inclusive start..end coordinate
/// sequence, or `None` when the cells are not connected (impossible on a
/// freshly generated maze, normal on a hand-carved one).
///
/// Start and end are clamped into the grid rather than rejected, preserving
/// the lenient contract the game relies on; strict callers must pre-check.
///
/// A* over the wall graph: unit step cost, Manhattan heuristic (admissible
/// and consistent here, so the first pop of a coordinate finalizes it). The
/// open set is a binary heap keyed on `f` with a coordinate-indexed side
/// table for the already-open check; superseded heap entries are skipped
/// lazily on pop. Equal-`f` entries pop in a fixed arena order, which only
/// picks among equal-length routes.
pub fn find_path(
    maze: &Maze,
    start_x: i32,
    start_y: i32,
    end_x: i32,
    end_y: i32,
) -> Option<Vec<GridCoordinate>> {
    let clamp = |value: i32, length: usize| -> u32 {
        (i64::from(value)).clamp(0, length as i64 - 1) as u32
    };
    let width = maze.width().0;
    let height = maze.height().0;
    let start = GridCoordinate::new(clamp(start_x, width), clamp(start_y, height));
    let end = GridCoordinate::new(clamp(end_x, width), clamp(end_y, height));

    search(maze, start, end)
}

fn search(maze: &Maze, start: GridCoordinate, end: GridCoordinate) -> Option<Vec<GridCoordinate>> {
    let mut nodes = vec![SearchNode {
        coord: start,
        g: 0,
        f: manhattan_distance(start, end),
        parent: None,
    }];

    // (Reverse(f), arena index): BinaryHeap is a max-heap, so Reverse orders
    // by lowest f and ties pop newest-node-first.
    let mut open = BinaryHeap::new();
    open.push((Reverse(nodes[0].f), 0usize));

    let capacity = maze.size();
    let mut open_lookup: FnvHashMap<GridCoordinate, usize> =
        FnvHashMap::with_capacity_and_hasher(capacity, BuildHasherDefault::default());
    open_lookup.insert(start, 0);
    let mut closed: FnvHashSet<GridCoordinate> =
        FnvHashSet::with_capacity_and_hasher(capacity, BuildHasherDefault::default());

    while let Some((Reverse(f), index)) = open.pop() {
        let current = nodes[index];
        if closed.contains(&current.coord) || f > current.f {
            // stale heap entry, already finalized or relaxed since it was pushed
            continue;
        }
        if current.coord == end {
            return Some(reconstruct_path(&nodes, index));
        }
        closed.insert(current.coord);
        open_lookup.remove(&current.coord);

        for neighbour in maze.walkable_neighbours(current.coord) {
            if closed.contains(&neighbour) {
                continue;
            }
            let g = current.g + 1;
            match open_lookup.entry(neighbour) {
                Entry::Vacant(slot) => {
                    let f = g + manhattan_distance(neighbour, end);
                    nodes.push(SearchNode {
                        coord: neighbour,
                        g,
                        f,
                        parent: Some(index),
                    });
                    slot.insert(nodes.len() - 1);
                    open.push((Reverse(f), nodes.len() - 1));
                }
                Entry::Occupied(slot) => {
                    let open_index = *slot.get();
                    if g < nodes[open_index].g {
                        let h = nodes[open_index].f - nodes[open_index].g;
                        nodes[open_index].g = g;
                        nodes[open_index].f = g + h;
                        nodes[open_index].parent = Some(index);
                        open.push((Reverse(g + h), open_index));
                    }
                }
            }
        }
    }

    None
}

fn reconstruct_path(nodes: &[SearchNode], goal_index: usize) -> Vec<GridCoordinate> {
    let mut path = Vec::new();
    let mut cursor = Some(goal_index);
    while let Some(index) = cursor {
        path.push(nodes[index].coord);
        cursor = nodes[index].parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::cells::manhattan_distance;
    use crate::generators;
    use crate::units::{Height, Width};

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    fn generated(w: usize, h: usize, seed: u64) -> Maze {
        let mut rng = StdRng::seed_from_u64(seed);
        generators::generate_maze(Width(w), Height(h), &mut rng)
            .expect("test dimensions are valid")
    }

    /// 3x3 maze whose only route from (0,0) to (2,2) zig-zags through the
    /// middle column.
    fn z_corridor() -> Maze {
        let mut m = Maze::new(Width(3), Height(3)).unwrap();
        m.carve_passage(gc(0, 0), gc(1, 0));
        m.carve_passage(gc(1, 0), gc(1, 1));
        m.carve_passage(gc(1, 1), gc(1, 2));
        m.carve_passage(gc(1, 2), gc(2, 2));
        m
    }

    /// Breadth-first distance used to cross-check A* path lengths.
    fn bfs_steps(maze: &Maze, start: GridCoordinate, end: GridCoordinate) -> Option<u32> {
        let mut distances = vec![(start, 0u32)];
        let mut frontier = std::collections::VecDeque::from([start]);
        while let Some(coord) = frontier.pop_front() {
            let here = distances
                .iter()
                .find(|&&(c, _)| c == coord)
                .map(|&(_, d)| d)
                .unwrap();
            for next in maze.walkable_neighbours(coord) {
                if !distances.iter().any(|&(c, _)| c == next) {
                    distances.push((next, here + 1));
                    frontier.push_back(next);
                }
            }
        }
        distances.iter().find(|&&(c, _)| c == end).map(|&(_, d)| d)
    }

    #[test]
    fn exact_route_through_z_corridor() {
        let m = z_corridor();
        let path = find_path(&m, 0, 0, 2, 2).expect("corridor is connected");
        assert_eq!(path,
                   vec![gc(0, 0), gc(1, 0), gc(1, 1), gc(1, 2), gc(2, 2)]);
        assert_eq!(path.len() as u32, manhattan_distance(gc(0, 0), gc(2, 2)) + 1);
    }

    #[test]
    fn start_equals_end_is_a_single_cell_path() {
        let m = z_corridor();
        assert_eq!(find_path(&m, 1, 1, 1, 1), Some(vec![gc(1, 1)]));
    }

    #[test]
    fn disconnected_regions_have_no_path() {
        // two vertical corridors with every wall between them intact
        let mut m = Maze::new(Width(3), Height(3)).unwrap();
        m.carve_passage(gc(0, 0), gc(0, 1));
        m.carve_passage(gc(0, 1), gc(0, 2));
        m.carve_passage(gc(2, 0), gc(2, 1));
        m.carve_passage(gc(2, 1), gc(2, 2));

        assert_eq!(find_path(&m, 0, 0, 2, 2), None);
        assert_eq!(find_path(&m, 2, 0, 0, 2), None);
        // within one region the search still succeeds
        assert_eq!(find_path(&m, 0, 0, 0, 2),
                   Some(vec![gc(0, 0), gc(0, 1), gc(0, 2)]));
    }

    #[test]
    fn out_of_range_endpoints_are_clamped() {
        let m = generated(10, 10, 42);
        let clamped = find_path(&m, -5, -5, 99, 99);
        let exact = find_path(&m, 0, 0, 9, 9);
        assert!(exact.is_some());
        assert_eq!(clamped, exact);
    }

    #[test]
    fn repeated_searches_are_identical() {
        let m = generated(8, 8, 5);
        let first = find_path(&m, 0, 0, 7, 7);
        let second = find_path(&m, 0, 0, 7, 7);
        let third = find_path(&m, 0, 0, 7, 7);
        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn path_is_inclusive_and_walks_passages() {
        let m = generated(9, 6, 11);
        let path = find_path(&m, 0, 0, 8, 5).expect("generated mazes are connected");
        assert_eq!(path.first(), Some(&gc(0, 0)));
        assert_eq!(path.last(), Some(&gc(8, 5)));
        for pair in path.windows(2) {
            assert!(m.is_linked(pair[0], pair[1]),
                    "step {:?} -> {:?} crosses a wall",
                    pair[0],
                    pair[1]);
        }
    }

    #[test]
    fn relaxation_prefers_the_shorter_route() {
        // a 2x2 loop: two equally short routes plus a longer detour candidate
        let mut m = Maze::new(Width(2), Height(2)).unwrap();
        m.carve_passage(gc(0, 0), gc(1, 0));
        m.carve_passage(gc(0, 0), gc(0, 1));
        m.carve_passage(gc(1, 0), gc(1, 1));
        m.carve_passage(gc(0, 1), gc(1, 1));

        let path = find_path(&m, 0, 0, 1, 1).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Some(&gc(0, 0)));
        assert_eq!(path.last(), Some(&gc(1, 1)));
    }

    #[test]
    fn path_length_matches_breadth_first_distance() {
        let m = generated(12, 8, 17);
        for &(sx, sy, ex, ey) in &[(0, 0, 11, 7), (3, 2, 0, 7), (11, 0, 0, 0), (5, 5, 6, 2)] {
            let path = find_path(&m, sx, sy, ex, ey).unwrap();
            let steps = bfs_steps(&m, gc(sx as u32, sy as u32), gc(ex as u32, ey as u32))
                .unwrap();
            assert_eq!(path.len() as u32, steps + 1);
        }
    }

    #[test]
    fn quickcheck_paths_exist_and_are_minimal_on_generated_mazes() {
        fn prop(w: u8, h: u8, seed: u64, sx: u8, sy: u8, ex: u8, ey: u8) -> TestResult {
            let (w, h) = (usize::from(w % 10), usize::from(h % 10));
            if w == 0 || h == 0 {
                return TestResult::discard();
            }
            let mut rng = StdRng::seed_from_u64(seed);
            let m = generators::generate_maze(Width(w), Height(h), &mut rng).unwrap();

            let path = match find_path(&m, i32::from(sx), i32::from(sy), i32::from(ex),
                                       i32::from(ey)) {
                Some(p) => p,
                None => return TestResult::failed(),
            };

            let start = *path.first().unwrap();
            let end = *path.last().unwrap();
            let steps_ok = path.windows(2).all(|pair| m.is_linked(pair[0], pair[1]));
            let length_ok =
                path.len() as u32 == bfs_steps(&m, start, end).expect("connected") + 1;
            TestResult::from_bool(steps_ok && length_ok)
        }
        quickcheck(prop as fn(u8, u8, u64, u8, u8, u8, u8) -> TestResult);
    }
}
