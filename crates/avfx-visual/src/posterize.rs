//! Per-channel level quantization with optional ordered-hash dither.

use crate::frame::{Frame, to_u8};
use crate::noise::hash_noise;

/// Dither strength used by the pipeline, relative to one quantization step.
pub const DEFAULT_DITHER: f32 = 0.35;

/// Quantization settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posterize {
    /// Levels per channel; fewer than 2 disables the op.
    pub levels: u32,
    /// Add hash noise before quantizing.
    pub dither: bool,
    /// Noise amplitude as a fraction of one step.
    pub dither_amount: f32,
}

impl Posterize {
    /// `levels` without dither.
    pub fn new(levels: u32) -> Self {
        Self {
            levels,
            dither: false,
            dither_amount: DEFAULT_DITHER,
        }
    }

    /// Enable or disable dither.
    pub fn with_dither(mut self, dither: bool) -> Self {
        self.dither = dither;
        self
    }
}

/// Quantize R, G and B to `levels` steps of `255 / (levels - 1)`.
///
/// With dither, each pixel is offset by `(hash(i) - 0.5) · 2 · amount · step`
/// before quantizing, where `i` is the pixel's byte index. Alpha passes
/// through.
///
/// ```rust
/// use avfx_visual::{Frame, Posterize, posterize};
///
/// let img = Frame::filled(1, 1, [100, 20, 240, 255]);
/// let out = posterize(&img, Posterize::new(2));
/// assert_eq!(out.pixel(0, 0), [0, 0, 255, 255]);
/// ```
pub fn posterize(img: &Frame, settings: Posterize) -> Frame {
    if settings.levels < 2 {
        return img.clone();
    }
    let step = 255.0 / (settings.levels - 1) as f32;
    let inv = 1.0 / step;
    let amount = if settings.dither_amount.is_finite() {
        settings.dither_amount
    } else {
        0.0
    };

    let mut out = img.blank_like();
    for (i, (o, p)) in out
        .pixels_mut()
        .chunks_exact_mut(4)
        .zip(img.pixels().chunks_exact(4))
        .enumerate()
    {
        let offset = if settings.dither {
            (hash_noise((i * 4) as u32) - 0.5) * 2.0 * amount * step
        } else {
            0.0
        };
        for c in 0..3 {
            let v = if settings.dither {
                f32::from(to_u8((f32::from(p[c]) + offset).trunc()))
            } else {
                f32::from(p[c])
            };
            o[c] = to_u8((v * inv).round() * step);
        }
        o[3] = p[3];
    }
    out
}
