use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tally_tree::{
    count_trees, count_trees_with_edge, expected_stickmen, expected_stickmen_closed_form,
    DegreeSequence,
};

fn tree_benchmark(c: &mut Criterion) {
    let ds = DegreeSequence::new(vec![5, 4, 3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 4, 1])
        .expect("fixture sequence");
    c.bench_function("cayley/fourteen", |b| {
        b.iter(|| count_trees(black_box(&ds)));
    });
    c.bench_function("edge_merge/fourteen", |b| {
        b.iter(|| count_trees_with_edge(black_box(&ds), 0, 1));
    });
    c.bench_function("stickmen/by_edges", |b| {
        b.iter(|| expected_stickmen(black_box(&ds)));
    });
    c.bench_function("stickmen/closed_form", |b| {
        b.iter(|| expected_stickmen_closed_form(black_box(&ds)));
    });
}

criterion_group!(benches, tree_benchmark);
criterion_main!(benches);
