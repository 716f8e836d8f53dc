//! Benchmarks for mesh-io operations.
//!
//! Run with: cargo bench -p mesh-io
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-io -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-io -- --baseline main

#![allow(missing_docs, clippy::expect_used, clippy::cast_possible_truncation)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_io::{LoadOptions, decode_stl, load_mesh, save_stl, write_stl_ascii, write_stl_binary};
use mesh_types::{Face, Mesh, MeshVertex};
use tempfile::tempdir;

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Create a rippled heightfield with `n * n` cells (`2 * n * n` triangles).
fn create_terrain(n: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity("terrain", ((n + 1) * (n + 1)) as usize, (2 * n * n) as usize);

    for j in 0..=n {
        for i in 0..=n {
            let x = f64::from(i) / f64::from(n);
            let y = f64::from(j) / f64::from(n);
            let z = 0.1 * (x * 12.0).sin() * (y * 9.0).cos();
            mesh.push_vertex(MeshVertex::from_coords(x, y, z));
        }
    }

    let row = n + 1;
    for j in 0..n {
        for i in 0..n {
            let a = j * row + i;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            mesh.push_face(Face::new([a, d, b]));
            mesh.push_face(Face::new([a, c, d]));
        }
    }

    mesh
}

// =============================================================================
// Decode Benchmarks
// =============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode");

    for n in [16, 64, 128] {
        let terrain = create_terrain(n);
        let mut binary = Vec::new();
        write_stl_binary(&terrain, &mut binary).expect("failed to encode binary STL");
        let mut ascii = Vec::new();
        write_stl_ascii(&terrain, &mut ascii).expect("failed to encode ASCII STL");

        let label = format!("{}tri", terrain.faces.len());
        group.throughput(Throughput::Elements(terrain.faces.len() as u64));

        let welded = LoadOptions::default();
        let separate = LoadOptions::default().with_no_dedupe(true);
        let cleaned = LoadOptions::clean();

        group.bench_with_input(BenchmarkId::new("binary_welded", &label), &binary, |b, data| {
            b.iter(|| decode_stl(black_box(data), "bench", &welded));
        });
        group.bench_with_input(BenchmarkId::new("binary_no_dedupe", &label), &binary, |b, data| {
            b.iter(|| decode_stl(black_box(data), "bench", &separate));
        });
        group.bench_with_input(BenchmarkId::new("binary_clean", &label), &binary, |b, data| {
            b.iter(|| decode_stl(black_box(data), "bench", &cleaned));
        });
        group.bench_with_input(BenchmarkId::new("ascii_welded", &label), &ascii, |b, data| {
            b.iter(|| decode_stl(black_box(data), "bench", &welded));
        });
    }

    group.finish();
}

// =============================================================================
// File I/O Benchmarks
// =============================================================================

fn bench_io(c: &mut Criterion) {
    let mut group = c.benchmark_group("IO");

    let terrain = create_terrain(64);
    let temp_dir = tempdir().expect("failed to create temp dir");

    let binary_path = temp_dir.path().join("bench_terrain.stl");
    let ascii_path = temp_dir.path().join("bench_terrain_ascii.stl");
    save_stl(&terrain, &binary_path, true).expect("failed to save binary STL");
    save_stl(&terrain, &ascii_path, false).expect("failed to save ASCII STL");

    group.throughput(Throughput::Elements(terrain.faces.len() as u64));

    group.bench_function("load_stl_binary", |b| {
        b.iter(|| load_mesh(black_box(&binary_path)));
    });
    group.bench_function("load_stl_ascii", |b| {
        b.iter(|| load_mesh(black_box(&ascii_path)));
    });

    let out = temp_dir.path().join("bench_out.stl");
    group.bench_function("save_stl_binary", |b| {
        b.iter(|| save_stl(black_box(&terrain), black_box(&out), true));
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_decode, bench_io);
criterion_main!(benches);
