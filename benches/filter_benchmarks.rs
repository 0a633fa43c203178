//! Benchmarks for metric smoothing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use facial_event_detection::{
    calibration::Calibrator,
    filters::{ema, ExponentialFilter},
    metrics::MetricSample,
};

fn noisy_samples(count: usize) -> Vec<MetricSample> {
    (0..count)
        .map(|i| {
            let t = i as f64 * 0.1;
            MetricSample::new(
                0.30 + 0.05 * t.sin() + 0.01 * rand::random::<f64>(),
                0.10 + 0.03 * t.cos() + 0.01 * rand::random::<f64>(),
                0.05 + 0.01 * rand::random::<f64>(),
            )
        })
        .collect()
}

fn benchmark_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing");
    let data = noisy_samples(100);

    group.bench_function("ema_scalar", |b| {
        b.iter(|| black_box(ema(black_box(Some(0.3)), black_box(0.25), black_box(0.35))));
    });

    for alpha in [0.1, 0.35, 0.8] {
        let mut filter = ExponentialFilter::new(alpha);

        group.bench_with_input(BenchmarkId::new("single_update", alpha), &data[0], |b, sample| {
            b.iter(|| black_box(filter.apply(black_box(sample))));
        });

        group.bench_with_input(BenchmarkId::new("sequence_100", alpha), &data, |b, data| {
            b.iter(|| {
                filter.reset();
                for sample in data {
                    black_box(filter.apply(black_box(sample)));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_calibration(c: &mut Criterion) {
    let data = noisy_samples(60);

    c.bench_function("calibration_60_frames", |b| {
        b.iter(|| {
            let mut calibrator = Calibrator::default();
            for sample in &data {
                calibrator.update(black_box(sample));
            }
            black_box(calibrator.status())
        });
    });
}

criterion_group!(benches, benchmark_smoothing, benchmark_calibration);
criterion_main!(benches);
