//! Linear blend of two frames.

use avfx_core::clamp01;

use crate::frame::{Frame, Result, to_u8};

/// Per-channel `a + (b - a) · mix`, alpha forced opaque.
///
/// `mix` is clamped to `[0, 1]`; `0` reproduces `a`'s colour and `1`
/// reproduces `b`'s.
///
/// ```rust
/// use avfx_visual::{Frame, blend};
///
/// let black = Frame::filled(2, 2, [0, 0, 0, 255]);
/// let white = Frame::filled(2, 2, [255, 255, 255, 255]);
/// let gray = blend(&black, &white, 0.5).unwrap();
/// assert_eq!(gray.pixel(0, 0), [128, 128, 128, 255]);
/// ```
pub fn blend(a: &Frame, b: &Frame, mix: f32) -> Result<Frame> {
    a.check_same_size(b)?;
    let mix = clamp01(mix);
    let mut out = a.blank_like();

    for ((o, pa), pb) in out
        .pixels_mut()
        .chunks_exact_mut(4)
        .zip(a.pixels().chunks_exact(4))
        .zip(b.pixels().chunks_exact(4))
    {
        for c in 0..3 {
            let va = f32::from(pa[c]);
            let vb = f32::from(pb[c]);
            o[c] = to_u8(va + (vb - va) * mix);
        }
        o[3] = 255;
    }
    Ok(out)
}
