//! Domain warp driven by two fBm displacement fields.

use crate::frame::Frame;
use crate::noise::fbm2d;

const OCTAVES: u32 = 4;
const TIME_SCALE: f32 = 20.0;

/// Displace each pixel by `(fbm_x, fbm_y) · cell_px · depth` and read the
/// source at the rounded, clamped coordinate.
///
/// `cell_px` sets the noise feature size; `time` in seconds slides the
/// fields for animation. `depth <= 0` or `cell_px <= 0` returns a copy.
pub fn fractal_warp(img: &Frame, cell_px: f32, depth: f32, time: f32) -> Frame {
    let active = depth > 0.0 && cell_px > 0.0 && cell_px.is_finite();
    if !active || img.is_empty() {
        return img.clone();
    }
    let max_shift = cell_px * depth.min(1.0);
    let t = if time.is_finite() { time * TIME_SCALE } else { 0.0 };
    let (w, h) = img.size();
    let max_x = (w - 1) as f32;
    let max_y = (h - 1) as f32;

    let mut out = img.blank_like();
    for y in 0..h {
        let fy = y as f32;
        for x in 0..w {
            let fx = x as f32;
            let nx = fbm2d((fx + t) / cell_px, (fy + 17.0) / cell_px, OCTAVES);
            let ny = fbm2d((fx + 333.0) / cell_px, (fy + t) / cell_px, OCTAVES);

            let sx = (fx + nx * max_shift).round().clamp(0.0, max_x) as u32;
            let sy = (fy + ny * max_shift).round().clamp(0.0, max_y) as u32;

            let s = img.index(sx, sy);
            let d = img.index(x, y);
            out.pixels_mut()[d..d + 4].copy_from_slice(&img.pixels()[s..s + 4]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripes() -> Frame {
        let pixels = (0..32u32 * 32)
            .flat_map(|i| {
                let v = ((i % 32) * 8) as u8;
                [v, 255 - v, 0, 255]
            })
            .collect();
        Frame::from_rgba(32, 32, pixels).unwrap()
    }

    #[test]
    fn test_zero_depth_or_cell_identity() {
        let img = stripes();
        assert_eq!(fractal_warp(&img, 16.0, 0.0, 1.0), img);
        assert_eq!(fractal_warp(&img, 0.0, 1.0, 1.0), img);
        assert_eq!(fractal_warp(&img, 16.0, f32::NAN, 1.0), img);
    }

    #[test]
    fn test_warp_moves_pixels() {
        let img = stripes();
        assert_ne!(fractal_warp(&img, 16.0, 1.0, 0.0), img);
    }

    #[test]
    fn test_deterministic_in_time() {
        let img = stripes();
        let a = fractal_warp(&img, 10.0, 0.5, 2.5);
        assert_eq!(a, fractal_warp(&img, 10.0, 0.5, 2.5));
        assert_ne!(a, fractal_warp(&img, 10.0, 0.5, 7.0));
    }

    #[test]
    fn test_only_source_colours_appear() {
        let img = stripes();
        let out = fractal_warp(&img, 8.0, 1.0, 0.3);
        for p in out.pixels().chunks_exact(4) {
            assert_eq!(u16::from(p[0]) + u16::from(p[1]), 255);
        }
    }
}
