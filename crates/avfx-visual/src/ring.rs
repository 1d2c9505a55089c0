//! Per-row brightness oscillation, the picture-side ring modulator.

use avfx_core::Waveform;

use crate::frame::{Frame, to_u8};
use crate::noise::rnd2;

/// Ring visual settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingVisual {
    /// Oscillator cycles across the frame height.
    pub frequency: f32,
    /// Brightness scale at the oscillator peak (0..1).
    pub mix: f32,
    /// Oscillator shape.
    pub wave: Waveform,
}

/// Scale every pixel of row `y` by `(osc · 0.5 + 0.5) · mix`.
///
/// The oscillator phase is `y / h · frequency + time · frequency · 0.001`.
/// Noise rows hash the row index with the millisecond time, so a given
/// `time` always yields the same frame. Output alpha is opaque. `mix <= 0`
/// returns a copy.
///
/// ```rust
/// use avfx_core::Waveform;
/// use avfx_visual::{Frame, RingVisual, ring_visual};
///
/// let img = Frame::filled(3, 3, [200, 100, 50, 255]);
/// let half = RingVisual { frequency: 0.0, mix: 1.0, wave: Waveform::Sine };
/// assert_eq!(ring_visual(&img, half, 0.0).pixel(1, 1), [100, 50, 25, 255]);
/// ```
pub fn ring_visual(img: &Frame, settings: RingVisual, time: f32) -> Frame {
    if settings.mix.is_nan() || settings.mix <= 0.0 || img.is_empty() {
        return img.clone();
    }
    let mix = settings.mix.min(1.0);
    let freq = if settings.frequency.is_finite() {
        settings.frequency
    } else {
        0.0
    };
    let time = if time.is_finite() { time } else { 0.0 };
    let phase = time * freq * 0.001;
    let time_ms = (time * 1000.0) as i32;
    let (w, h) = img.size();
    let row_bytes = w as usize * 4;

    let mut out = img.blank_like();
    for (y, (dst, src)) in out
        .pixels_mut()
        .chunks_exact_mut(row_bytes)
        .zip(img.pixels().chunks_exact(row_bytes))
        .enumerate()
    {
        let p = (y as f32 / h as f32) * freq + phase;
        let p = p - p.floor();
        let noise = rnd2(y as i32, time_ms) * 2.0 - 1.0;
        let osc = settings.wave.sample(p, noise);
        let scale = (osc * 0.5 + 0.5) * mix;

        for (o, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
            o[0] = to_u8(f32::from(s[0]) * scale);
            o[1] = to_u8(f32::from(s[1]) * scale);
            o[2] = to_u8(f32::from(s[2]) * scale);
            o[3] = 255;
        }
    }
    out
}
