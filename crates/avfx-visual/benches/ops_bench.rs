//! Criterion benchmarks for the pixel ops
//!
//! Run with: cargo bench -p avfx-visual
#![allow(missing_docs)]

use avfx_core::{Lcg, Waveform};
use avfx_visual::{
    Frame, GlobalAdjust, Posterize, RingVisual, block_pattern, blend, edge_detect, fractal_warp,
    global_adjust, pixelate, posterize, ring_visual, shift,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const SIZES: &[u32] = &[256, 512];

fn source(size: u32) -> Frame {
    block_pattern(size, size, &mut Lcg::new(7))
}

fn bench_op(c: &mut Criterion, name: &str, op: impl Fn(&Frame) -> Frame) {
    let mut group = c.benchmark_group(name);
    for &size in SIZES {
        let img = source(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(op(black_box(&img))))
        });
    }
    group.finish();
}

fn bench_all(c: &mut Criterion) {
    bench_op(c, "blend", |img| {
        blend(img, img, 0.5).unwrap_or_else(|_| img.clone())
    });
    bench_op(c, "shift", |img| shift(img, 37));
    bench_op(c, "edge_detect", |img| edge_detect(img, 0.8));
    bench_op(c, "pixelate", |img| pixelate(img, 8.0));
    bench_op(c, "posterize_dither", |img| {
        posterize(img, Posterize::new(6).with_dither(true))
    });
    bench_op(c, "fractal_warp", |img| {
        fractal_warp(img, img.width() as f32 * 0.3, 0.5, 1.25)
    });
    bench_op(c, "ring_visual", |img| {
        let ring = RingVisual {
            frequency: 440.0,
            mix: 0.7,
            wave: Waveform::Triangle,
        };
        ring_visual(img, ring, 2.0)
    });
    bench_op(c, "global_adjust", |img| {
        let settings = GlobalAdjust {
            contrast: 1.4,
            threshold: 0.2,
            gamma: 0.8,
            preserve_bright: false,
        };
        global_adjust(img, settings)
    });
}

criterion_group!(benches, bench_all);
criterion_main!(benches);
