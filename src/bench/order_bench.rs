//! Criterion timings for the six loop orders.
//!
//! Wall-clock only; the counter-based numbers come from the main binary.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use matmul_orders::{LoopOrder, Matrix, SeedPolicy};

fn bench_orders(c: &mut Criterion) {
    let mut group = c.benchmark_group("loop_order");
    group.sample_size(10);

    for size in [64, 128, 256] {
        let mut rng = SeedPolicy::Fixed(7).rng_for(size);
        let mut a = Matrix::create(size).unwrap();
        let mut b = Matrix::create(size).unwrap();
        a.populate(&mut rng);
        b.populate(&mut rng);
        let mut out = Matrix::create(size).unwrap();

        group.throughput(Throughput::Elements((2 * size * size * size) as u64));
        for order in LoopOrder::ALL {
            let id = BenchmarkId::new(order.label(), size);
            group.bench_with_input(id, &size, |bench, _| {
                bench.iter(|| {
                    order.multiply(black_box(&a), black_box(&b), &mut out).unwrap();
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_orders);
criterion_main!(benches);
