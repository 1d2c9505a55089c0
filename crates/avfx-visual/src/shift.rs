//! Circular horizontal roll, the visual stand-in for an audio delay.

use crate::frame::Frame;

/// Roll every row right by `px` pixels, wrapping around.
///
/// Negative shifts roll left. Shifts are taken modulo the width, so a
/// shift of `0` or of the full width returns an identical frame.
///
/// ```rust
/// use avfx_visual::{Frame, shift};
///
/// let pixels = vec![1, 1, 1, 255, 2, 2, 2, 255, 3, 3, 3, 255];
/// let row = Frame::from_rgba(3, 1, pixels).unwrap();
/// let rolled = shift(&row, 1);
/// assert_eq!(rolled.pixel(0, 0), [3, 3, 3, 255]);
/// assert_eq!(rolled.pixel(1, 0), [1, 1, 1, 255]);
/// ```
pub fn shift(img: &Frame, px: i64) -> Frame {
    let width = i64::from(img.width());
    if width == 0 {
        return img.clone();
    }
    let offset = px.rem_euclid(width) as usize;
    if offset == 0 {
        return img.clone();
    }

    let row_bytes = img.width() as usize * 4;
    let split = offset * 4;
    let mut out = img.blank_like();

    for (dst, src) in out
        .pixels_mut()
        .chunks_exact_mut(row_bytes)
        .zip(img.pixels().chunks_exact(row_bytes))
    {
        dst[..split].copy_from_slice(&src[row_bytes - split..]);
        dst[split..].copy_from_slice(&src[..row_bytes - split]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: u32, height: u32) -> Frame {
        let pixels = (0..width * height)
            .flat_map(|i| [i as u8, 0, 0, 255])
            .collect();
        Frame::from_rgba(width, height, pixels).unwrap()
    }

    #[test]
    fn test_identity_shifts() {
        let img = numbered(5, 3);
        assert_eq!(shift(&img, 0), img);
        assert_eq!(shift(&img, 5), img);
        assert_eq!(shift(&img, -10), img);
    }

    #[test]
    fn test_negative_rolls_left() {
        let img = numbered(4, 1);
        let out = shift(&img, -1);
        assert_eq!(out.pixel(0, 0)[0], 1);
        assert_eq!(out.pixel(3, 0)[0], 0);
        assert_eq!(shift(&img, -1), shift(&img, 3));
    }

    #[test]
    fn test_rows_independent() {
        let img = numbered(3, 2);
        let out = shift(&img, 1);
        assert_eq!(out.pixel(0, 1)[0], 5);
        assert_eq!(out.pixel(1, 1)[0], 3);
    }

    #[test]
    fn test_empty_frame() {
        let empty = Frame::new(0, 4);
        assert_eq!(shift(&empty, 3), empty);
    }
}
