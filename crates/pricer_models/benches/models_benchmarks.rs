//! Criterion benchmarks for pricer_models.
//!
//! Measures Black-Scholes pricing and implied volatility calibration with
//! both root-finding methods.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::analytical::{price_call, price_put, volatility_sweep, Grid};
use pricer_models::calibration::{
    CalibrationConfig, CalibrationMethod, ImpliedVolCalibrator, MarketObservation,
};
use pricer_models::instruments::ContractParameters;

/// Benchmark single call and put prices.
fn bench_pricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("black_scholes");

    group.bench_function("call", |b| {
        b.iter(|| {
            price_call(
                black_box(100.0),
                black_box(105.0),
                black_box(1.0),
                black_box(0.05),
                black_box(0.2),
            )
        })
    });
    group.bench_function("put", |b| {
        b.iter(|| {
            price_put(
                black_box(100.0),
                black_box(105.0),
                black_box(1.0),
                black_box(0.05),
                black_box(0.2),
            )
        })
    });

    let base = ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
    group.bench_function("volatility_sweep", |b| {
        b.iter(|| volatility_sweep(black_box(&base), &Grid::VOLATILITY))
    });

    group.finish();
}

/// Benchmark implied volatility for each method across strikes.
fn bench_calibration(c: &mut Criterion) {
    let mut group = c.benchmark_group("implied_volatility");

    for method in [CalibrationMethod::StepSearch, CalibrationMethod::Bracketing] {
        let calibrator = ImpliedVolCalibrator::new(CalibrationConfig::default().with_method(method));
        for strike in [90.0, 100.0, 110.0] {
            let call = price_call(100.0, strike, 1.0, 0.05, 0.2).unwrap();
            let obs = MarketObservation::new(100.0, strike, 1.0, 0.05, 0.25).with_call(call);
            group.bench_with_input(
                BenchmarkId::new(method.as_str(), strike),
                &obs,
                |b, obs| b.iter(|| calibrator.calibrate(black_box(obs))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_pricing, bench_calibration);
criterion_main!(benches);
