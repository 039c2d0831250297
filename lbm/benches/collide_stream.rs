use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use lbm::{BgkDynamics, Lattice3D};

fn bench_collide_and_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("collide_and_stream");
    for &n in &[8usize, 16, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut lattice = Lattice3D::new(n, n, n, BgkDynamics::new(1.0));
            lattice.initialize();
            b.iter(|| lattice.collide_and_stream());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_collide_and_stream);
criterion_main!(benches);
