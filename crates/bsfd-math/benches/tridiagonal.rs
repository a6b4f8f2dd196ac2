use bsfd_math::{trisolve, ConstTridiagonal};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_tridiagonal(c: &mut Criterion) {
    let n = 999;
    let target: Vec<f64> = (0..n).map(|i| (i as f64 * 0.01).sin()).collect();

    c.bench_function("trisolve (uncached, n=999)", |b| {
        b.iter(|| trisolve(-0.4, 1.9, -0.5, black_box(&target)))
    });

    let sys = ConstTridiagonal::new(-0.4, 1.9, -0.5, n).expect("well-posed system");
    let mut out = vec![0.0; n];
    c.bench_function("ConstTridiagonal::solve_into (cached, n=999)", |b| {
        b.iter(|| sys.solve_into(black_box(&target), &mut out))
    });
}

criterion_group!(benches, bench_tridiagonal);
criterion_main!(benches);
