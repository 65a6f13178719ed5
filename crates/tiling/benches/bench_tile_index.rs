use std::hint::black_box;
use std::time::Instant;

use riverworld_common::{RenderPoint, TileKey};
use riverworld_tiling::TileIndex;

fn make_path(point_count: usize, spacing: f64) -> Vec<RenderPoint> {
    (0..point_count)
        .map(|i| {
            let x = i as f64 * spacing;
            let z = (i as f64 * 0.05).sin() * 200.0;
            RenderPoint::new(x, z)
        })
        .collect()
}

fn bench_build(point_count: usize, iterations: usize) {
    let path = make_path(point_count, 10.0);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(TileIndex::build(100.0, black_box(path.clone()), 150.0));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  build ({point_count} points, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_points_in_tile(point_count: usize, iterations: usize) {
    let path = make_path(point_count, 10.0);
    let index = TileIndex::build(100.0, path, 150.0);
    let keys: Vec<TileKey> = index.tiles().map(|t| t.key).collect();

    let start = Instant::now();
    for i in 0..iterations {
        let key = keys[i % keys.len()];
        let _ = black_box(index.points_in_tile(black_box(key)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  tile query ({point_count} points, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_tiles_for_point(point_count: usize, iterations: usize) {
    let path = make_path(point_count, 10.0);
    let index = TileIndex::build(100.0, path, 150.0);

    let start = Instant::now();
    for i in 0..iterations {
        let _ = black_box(index.tiles_for_point(black_box(i % point_count)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  point query ({point_count} points, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Tile Index Benchmarks ===\n");

    println!("Index build:");
    bench_build(100, 1000);
    bench_build(1000, 100);
    bench_build(10000, 10);

    println!("\nTile -> points lookup:");
    bench_points_in_tile(1000, 100000);
    bench_points_in_tile(10000, 10000);

    println!("\nPoint -> tiles lookup:");
    bench_tiles_for_point(1000, 100000);
    bench_tiles_for_point(10000, 10000);

    println!("\n=== Done ===");
}
