use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_engine(c: &mut Criterion) {
    let params = store_core::OperatingParameters::default();
    c.bench_function("compute_financials", |b| {
        b.iter(|| store_econ::compute_financials(black_box(&params)))
    });
    c.bench_function("sweep_sensitivity", |b| {
        b.iter(|| store_econ::sweep_sensitivity(black_box(&params)))
    });
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
