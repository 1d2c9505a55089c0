//! Procedural base image used when no picture can be loaded.

use avfx_core::Lcg;

use crate::frame::Frame;

/// Square colours.
pub const PALETTE: [[u8; 3]; 12] = [
    [0xff, 0x00, 0x4c],
    [0xff, 0xb3, 0x00],
    [0x00, 0xc8, 0xff],
    [0x1e, 0xff, 0x00],
    [0xff, 0x6d, 0x00],
    [0xd5, 0x00, 0xf9],
    [0x00, 0xff, 0xb3],
    [0xff, 0xe6, 0x00],
    [0xff, 0x00, 0xc8],
    [0x00, 0x6d, 0xff],
    [0xff, 0xff, 0xff],
    [0x00, 0x00, 0x00],
];

/// Share of the frame area covered by squares, before overlap.
pub const DENSITY: f32 = 0.1;

/// Opaque black frame scattered with randomly placed palette squares.
///
/// Square sides fall in `[min, max)` where
/// `min = max(8, floor(short_side · 0.02))` and
/// `max = max(min + 1, floor(short_side · 0.15))`; the count is
/// `floor(w · h · DENSITY / max²)`. The same `rng` state always draws the
/// same picture.
///
/// ```rust
/// use avfx_core::Lcg;
/// use avfx_visual::block_pattern;
///
/// let a = block_pattern(64, 64, &mut Lcg::new(3));
/// let b = block_pattern(64, 64, &mut Lcg::new(3));
/// assert_eq!(a, b);
/// assert!(a.pixels().chunks_exact(4).all(|p| p[3] == 255));
/// ```
pub fn block_pattern(width: u32, height: u32, rng: &mut Lcg) -> Frame {
    let mut frame = Frame::filled(width, height, [0, 0, 0, 255]);
    if frame.is_empty() {
        return frame;
    }

    let short = width.min(height) as f32;
    let min = 8u32.max((short * 0.02) as u32);
    let max = (min + 1).max((short * 0.15) as u32);
    let count = (width as f32 * height as f32 * DENSITY / (max as f32 * max as f32)) as u32;

    for _ in 0..count {
        let size = min + (rng.next_f32() * (max - min) as f32) as u32;
        let x = (rng.next_f32() * width.saturating_sub(size) as f32) as u32;
        let y = (rng.next_f32() * height.saturating_sub(size) as f32) as u32;
        let colour = PALETTE[(rng.next_f32() * PALETTE.len() as f32) as usize % PALETTE.len()];
        fill_rect(&mut frame, x, y, size, colour);
    }
    frame
}

/// Fill a square, clipped to the frame.
fn fill_rect(frame: &mut Frame, x: u32, y: u32, size: u32, colour: [u8; 3]) {
    let x_end = x.saturating_add(size).min(frame.width());
    let y_end = y.saturating_add(size).min(frame.height());
    for row in y..y_end {
        for col in x..x_end {
            let i = frame.index(col, row);
            frame.pixels_mut()[i..i + 4].copy_from_slice(&[colour[0], colour[1], colour[2], 255]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeds_differ() {
        let a = block_pattern(128, 128, &mut Lcg::new(1));
        let b = block_pattern(128, 128, &mut Lcg::new(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_only_palette_colours() {
        let frame = block_pattern(200, 100, &mut Lcg::new(9));
        for p in frame.pixels().chunks_exact(4) {
            assert!(PALETTE.contains(&[p[0], p[1], p[2]]));
        }
    }

    #[test]
    fn test_has_squares() {
        let frame = block_pattern(512, 512, &mut Lcg::new(12345));
        let lit = frame
            .pixels()
            .chunks_exact(4)
            .filter(|p| p[..3] != [0, 0, 0])
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn test_tiny_frames() {
        let frame = block_pattern(3, 2, &mut Lcg::new(1));
        assert_eq!(frame.size(), (3, 2));
        assert!(block_pattern(0, 0, &mut Lcg::new(1)).is_empty());
    }
}
