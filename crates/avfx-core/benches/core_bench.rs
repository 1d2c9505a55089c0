//! Criterion benchmarks for avfx-core primitives
//!
//! Run with: cargo bench -p avfx-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use avfx_core::{
    Biquad, EnvelopeFollower, InterpolatedDelay, Lfo, SmoothedParam, Waveform,
    peaking_eq_coefficients,
};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 256, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_biquad(c: &mut Criterion) {
    let mut group = c.benchmark_group("Biquad");
    let coeffs = peaking_eq_coefficients(1000.0, 0.707, 6.0, SAMPLE_RATE);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        group.bench_with_input(
            BenchmarkId::new("process", block_size),
            &block_size,
            |b, _| {
                let mut biquad = Biquad::new();
                biquad.set_coefficients(coeffs);
                b.iter(|| {
                    for &sample in &input {
                        black_box(biquad.process(black_box(sample)));
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("InterpolatedDelay");
    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        group.bench_with_input(
            BenchmarkId::new("read_write", block_size),
            &block_size,
            |b, _| {
                let mut delay = InterpolatedDelay::from_time(SAMPLE_RATE, 1.0);
                b.iter(|| {
                    for &sample in &input {
                        black_box(delay.read_write(black_box(sample), 9600.5));
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_lfo(c: &mut Criterion) {
    let mut group = c.benchmark_group("Lfo");
    for wave in [Waveform::Sine, Waveform::Triangle, Waveform::Noise] {
        group.bench_function(wave.name(), |b| {
            let mut lfo = Lfo::new(SAMPLE_RATE, 440.0);
            lfo.set_waveform(wave);
            b.iter(|| {
                for _ in 0..1024 {
                    black_box(lfo.advance());
                }
            });
        });
    }
    group.finish();
}

fn bench_smoothed_param(c: &mut Criterion) {
    c.bench_function("SmoothedParam/advance_1024", |b| {
        let mut param = SmoothedParam::ramp(0.0, SAMPLE_RATE);
        b.iter(|| {
            param.set_target(black_box(1.0));
            for _ in 0..1024 {
                black_box(param.advance());
            }
        });
    });
}

fn bench_envelope_follower(c: &mut Criterion) {
    let input = generate_test_signal(1024);
    c.bench_function("EnvelopeFollower/process_1024", |b| {
        let mut env = EnvelopeFollower::new(SAMPLE_RATE);
        b.iter(|| {
            for &sample in &input {
                black_box(env.process(black_box(sample)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_biquad,
    bench_delay,
    bench_lfo,
    bench_smoothed_param,
    bench_envelope_follower,
);

criterion_main!(benches);
