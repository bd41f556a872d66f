use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tally_mesh::{masks, mesh};

fn mesh_benchmark(c: &mut Criterion) {
    c.bench_function("mesh/ones_16", |b| {
        b.iter(|| mesh(black_box(&[1; 16])).count());
    });
    c.bench_function("masks/16_choose_8", |b| {
        b.iter(|| masks(black_box(16), black_box(8)).count());
    });
    c.bench_function("mesh/prufer_7", |b| {
        b.iter(|| mesh(black_box(&[6; 5])).count());
    });
}

criterion_group!(benches, mesh_benchmark);
criterion_main!(benches);
