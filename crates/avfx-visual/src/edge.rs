//! Sobel edge map.

use crate::frame::{Frame, to_u8};

/// Grayscale Sobel gradient magnitude scaled by `amount · 0.25`.
///
/// The red channel stands in for luma. Interior pixels get the magnitude
/// on R, G and B with opaque alpha; the one-pixel border stays transparent
/// black.
pub fn edge_detect(img: &Frame, amount: f32) -> Frame {
    let mut out = img.blank_like();
    let (w, h) = img.size();
    if w < 3 || h < 3 {
        return out;
    }
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let src = img.pixels();
    let r = |x: u32, y: u32| f32::from(src[img.index(x, y)]);

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let gx = r(x + 1, y - 1) - r(x - 1, y - 1) + 2.0 * (r(x + 1, y) - r(x - 1, y))
                + r(x + 1, y + 1)
                - r(x - 1, y + 1);
            let gy = r(x - 1, y + 1) - r(x - 1, y - 1) + 2.0 * (r(x, y + 1) - r(x, y - 1))
                + r(x + 1, y + 1)
                - r(x + 1, y - 1);
            let mag = to_u8((gx * gx + gy * gy).sqrt() * amount * 0.25);
            let i = img.index(x, y);
            let px = out.pixels_mut();
            px[i] = mag;
            px[i + 1] = mag;
            px[i + 2] = mag;
            px[i + 3] = 255;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_image_has_no_edges() {
        let out = edge_detect(&Frame::filled(5, 5, [90, 40, 10, 255]), 1.0);
        assert_eq!(out.pixel(2, 2), [0, 0, 0, 255]);
    }

    #[test]
    fn test_border_untouched() {
        let out = edge_detect(&Frame::filled(4, 4, [200, 0, 0, 255]), 1.0);
        assert_eq!(out.pixel(0, 0), [0; 4]);
        assert_eq!(out.pixel(3, 2), [0; 4]);
        assert_eq!(out.pixel(1, 1)[3], 255);
    }

    #[test]
    fn test_vertical_step_detected() {
        // left half black, right half white
        let pixels = (0..25u32)
            .flat_map(|i| {
                let v = if i % 5 >= 3 { 255 } else { 0 };
                [v, v, v, 255]
            })
            .collect();
        let img = Frame::from_rgba(5, 5, pixels).unwrap();
        let out = edge_detect(&img, 1.0);
        // gx = 4 · 255 at the step, times 0.25
        assert_eq!(out.pixel(2, 2)[0], 255);
        assert_eq!(out.pixel(1, 2)[0], 0);
        let weak = edge_detect(&img, 0.25);
        assert_eq!(weak.pixel(2, 2)[0], 64);
    }

    #[test]
    fn test_tiny_frames() {
        assert_eq!(edge_detect(&Frame::filled(2, 2, [255; 4]), 1.0), Frame::new(2, 2));
    }
}
