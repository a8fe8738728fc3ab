use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use jackknife::{jackknife_estimates, par_jackknife_estimates, leave_one_out_subsamples, JackknifeBlocks, thread_pool};
use statistics::Statistic;

fn random_observations(n: usize) -> Vec<f64> {
    fastrand::seed(42);
    (0..n).map(|_| fastrand::f64() * 100.0).collect()
}

/// Reusable subsample buffer vs. materializing every leave-one-out subsample beforehand.
fn bench_subsamples(c: &mut Criterion) {
    let mut group = c.benchmark_group("subsamples");
    for n in [100, 1_000] {
        let data = random_observations(n);
        group.bench_with_input(BenchmarkId::new("buffered", n), &data, |b, data| b.iter(|| {
            jackknife_estimates(black_box(data), &Statistic::Mean).expect("Mean should not fail on non-empty input")
        }));
        group.bench_with_input(BenchmarkId::new("materialized", n), &data, |b, data| b.iter(|| {
            leave_one_out_subsamples(black_box(data)).iter()
                .map(|subsample| statistics::mean(subsample))
                .collect::<Result<Vec<f64>, _>>()
                .expect("Mean should not fail on non-empty input")
        }));
    }
    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel");
    let data = random_observations(2_000);
    let pool = thread_pool(4).expect("Failed to build thread pool");
    group.bench_function("sequential_median", |b| b.iter(|| {
        jackknife_estimates(black_box(&data), &Statistic::Median).expect("Median should not fail on non-empty input")
    }));
    group.bench_function("parallel_median", |b| b.iter(|| {
        pool.install(|| par_jackknife_estimates(black_box(&data), &Statistic::Median))
            .expect("Median should not fail on non-empty input")
    }));
    group.finish();
}

fn bench_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("blocks");
    let data = random_observations(10_000);
    for block_size in [10, 100, 1_000] {
        let blocks = JackknifeBlocks::new(data.len(), block_size).expect("Invalid block size");
        group.bench_with_input(BenchmarkId::new("sample_variance", block_size), &blocks, |b, blocks| b.iter(|| {
            blocks.compute(black_box(&data), &Statistic::SampleVariance).expect("Block jackknife should not fail")
        }));
    }
    group.finish();
}

criterion_group!(benches, bench_subsamples, bench_parallel, bench_blocks);
criterion_main!(benches);
