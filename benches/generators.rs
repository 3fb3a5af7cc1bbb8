use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use gridmaze::generators;
use gridmaze::maze::Maze;
use gridmaze::units::{Height, Width};

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    c.bench_function("recursive_backtracker_maze_32", |b| {
        b.iter(|| {
            let mut maze = Maze::new(Width(32), Height(32)).unwrap();
            let mut rng = StdRng::seed_from_u64(0xfeed);
            generators::recursive_backtracker(&mut maze, &mut rng);
            maze
        })
    });
}

criterion_group!(benches, bench_recursive_backtracker_maze_32);
criterion_main!(benches);
