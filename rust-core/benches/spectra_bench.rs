//! ERS/FDS Benchmarks
//!
//! Sweep damage integral and convolution-based time-history spectra over a
//! growing natural frequency axis.
//!
//! Run with: cargo bench -p fatigue-spectra-core --bench spectra_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use fatigue_spectra::excitation::ResonatorBank;
use fatigue_spectra::spectrum::FftConvolver;
use fatigue_spectra::{
    Damping, FatigueLaw, FrequencyAxis, SpectrumEvaluator, SweepLoad, SweepType, TimeHistoryLoad,
};

fn bench_sweep_fds(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep_fds");
    let load = SweepLoad::new(vec![5.0, 10.0, 20.0], vec![20.0, 100.0, 500.0, 1000.0])
        .unwrap()
        .with_sweep(SweepType::Logarithmic, 1.0)
        .unwrap();
    let law = FatigueLaw::new(5.0, 1.0, 1.0).unwrap();
    let damping = Damping::from_q(10.0).unwrap();

    for step in [20.0, 5.0, 1.0].iter() {
        let axis = FrequencyAxis::from_range(5.0, 2000.0, *step).unwrap();
        group.throughput(Throughput::Elements(axis.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(axis.len()), &axis, |b, axis| {
            let bank = ResonatorBank::new(axis, damping);
            b.iter(|| load.fds(black_box(&bank), &law))
        });
    }

    group.finish();
}

fn bench_time_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_history");
    group.measurement_time(Duration::from_secs(10));

    let mut rng = StdRng::seed_from_u64(7);
    let samples: Vec<f64> = (0..16_384).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let load = TimeHistoryLoad::new(samples.clone(), 1e-3).unwrap();
    let law = FatigueLaw::new(5.0, 1.0, 1.0).unwrap();
    let axis = FrequencyAxis::from_range(10.0, 400.0, 10.0).unwrap();
    let bank = ResonatorBank::new(&axis, Damping::from_q(10.0).unwrap());

    group.bench_function("convolve_single", |b| {
        let convolver = FftConvolver::new(&samples).unwrap();
        let kernel: Vec<f64> = (0..samples.len())
            .map(|n| (-0.01 * n as f64).exp() * (0.3 * n as f64).sin())
            .collect();
        b.iter(|| convolver.convolve(black_box(&kernel)))
    });

    group.bench_function("ers", |b| b.iter(|| load.ers(black_box(&bank))));
    group.bench_function("fds", |b| b.iter(|| load.fds(black_box(&bank), &law)));

    group.finish();
}

criterion_group!(benches, bench_sweep_fds, bench_time_history);
criterion_main!(benches);
