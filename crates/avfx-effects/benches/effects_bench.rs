//! Criterion benchmarks for avfx audio nodes
//!
//! Run with: cargo bench -p avfx-effects
#![allow(missing_docs)]

use avfx_core::Effect;
use avfx_effects::{Bitcrusher, Chorus, FeedbackDelay, Gate, PitchShifter, RingMod, ThreeBandEq};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[128, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_effect<E: Effect>(c: &mut Criterion, name: &str, mut effect: E) {
    let mut group = c.benchmark_group(name);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut output = vec![0.0; block_size];
                b.iter(|| {
                    effect.process_block(black_box(&input), &mut output);
                    black_box(output[0])
                })
            },
        );
    }

    group.finish();
}

fn bench_all(c: &mut Criterion) {
    let mut ring = RingMod::new(SAMPLE_RATE);
    ring.set_mix(0.8);
    bench_effect(c, "RingMod", ring);

    let mut crush = Bitcrusher::new(SAMPLE_RATE);
    crush.set_bits(6);
    bench_effect(c, "Bitcrusher", crush);

    let mut delay = FeedbackDelay::new(SAMPLE_RATE);
    delay.set_feedback(0.5);
    bench_effect(c, "FeedbackDelay", delay);

    let mut chorus = Chorus::new(SAMPLE_RATE);
    chorus.set_depth(0.7);
    chorus.set_mix(0.6);
    bench_effect(c, "Chorus", chorus);

    let mut eq = ThreeBandEq::new(SAMPLE_RATE);
    eq.set_gains(6.0, -3.0, 4.0);
    bench_effect(c, "ThreeBandEq", eq);

    bench_effect(c, "Gate", Gate::new(SAMPLE_RATE));

    if let Ok(shifter) = PitchShifter::try_new(SAMPLE_RATE, 7) {
        bench_effect(c, "PitchShifter", shifter);
    }
}

criterion_group!(benches, bench_all);
criterion_main!(benches);
