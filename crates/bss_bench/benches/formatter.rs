//! Segment data formatter benchmarks.

use bss_bench::utils::generate_users;
use bss_core::{LineFormat, SegmentDataFormatter};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Benchmark text and container output for the same batch.
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_batch");

    for count in [10, 100, 1000].iter() {
        let users = generate_users(*count, 8);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("text", count), &users, |b, users| {
            b.iter(|| {
                let mut formatter = SegmentDataFormatter::text(Vec::new(), LineFormat::FULL);
                formatter.append(black_box(users)).unwrap();
                black_box(formatter.close().unwrap());
            });
        });

        group.bench_with_input(BenchmarkId::new("container", count), &users, |b, users| {
            b.iter(|| {
                let mut formatter = SegmentDataFormatter::container(Vec::new()).unwrap();
                formatter.append(black_box(users)).unwrap();
                black_box(formatter.close().unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_batch);

criterion_main!(benches);
