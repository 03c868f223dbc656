use cgmath::Vector4;
use criterion::{criterion_group, criterion_main, Criterion};

use deepimage::{CheckerPattern, TriMesh};

pub fn checker_grid(c: &mut Criterion) {
    let pattern = CheckerPattern::new(256, 256);

    c.bench_function("checker_grid_256", |b| b.iter(|| pattern.build()));
}

pub fn interleave(c: &mut Criterion) {
    let mesh = CheckerPattern::new(128, 128).build().unwrap();
    let cube = TriMesh::cube(1.0, Vector4::new(1.0, 1.0, 1.0, 1.0));

    c.bench_function("interleave_grid_128", |b| b.iter(|| mesh.interleaved()));
    c.bench_function("interleave_cube", |b| b.iter(|| cube.interleaved()));
}

criterion_group!(benches, checker_grid, interleave);
criterion_main!(benches);
