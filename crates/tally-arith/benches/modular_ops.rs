use criterion::{black_box, criterion_group, criterion_main, Criterion};
use num_bigint::BigUint;
use tally_arith::{factorial, power, FactorialTable, ModValue};
use tally_core::MODULUS;

fn modular_benchmark(c: &mut Criterion) {
    c.bench_function("mod_pow/fermat", |b| {
        b.iter(|| ModValue::new(black_box(123_456_789)).pow(black_box(MODULUS - 2)));
    });
    c.bench_function("factorial_table/100000", |b| {
        b.iter(|| FactorialTable::new(black_box(100_000)).expect("table"));
    });
    let table = FactorialTable::new(100_000).expect("table");
    c.bench_function("factorial_table/binomial", |b| {
        b.iter(|| table.binomial(black_box(99_999), black_box(49_999)).expect("binomial"));
    });
}

fn exact_benchmark(c: &mut Criterion) {
    c.bench_function("exact/factorial_500", |b| {
        b.iter(|| factorial(black_box(500)).expect("factorial"));
    });
    let base = BigUint::from(7u32);
    c.bench_function("exact/power_4096", |b| {
        b.iter(|| power(black_box(&base), black_box(4096)));
    });
}

criterion_group!(benches, modular_benchmark, exact_benchmark);
criterion_main!(benches);
