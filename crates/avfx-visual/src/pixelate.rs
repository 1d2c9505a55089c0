//! Blocky mosaic by nearest-neighbour down- and up-sampling.

use crate::frame::Frame;

/// Largest cell size the op honours.
pub const MAX_CELL: u32 = 256;

/// Downsample to `floor(w / cell) × floor(h / cell)` (at least 1×1) by
/// sampling cell centres, then upsample back with nearest neighbour.
///
/// `cell` is floored and clamped to `1..=256`; fractional sizes come from
/// preview scaling.
pub fn pixelate(img: &Frame, cell: f32) -> Frame {
    let cell = if cell.is_finite() { cell.floor() } else { 1.0 };
    let cell = (cell as u32).clamp(1, MAX_CELL);
    let (w, h) = img.size();
    if img.is_empty() || cell == 1 {
        return img.clone();
    }

    let small_w = (w / cell).max(1);
    let small_h = (h / cell).max(1);

    // centre of small pixel i maps back to source column floor((i + 0.5) · w / small_w)
    let sample = |i: u32, small: u32, full: u32| -> u32 {
        let pos = ((f64::from(i) + 0.5) * f64::from(full) / f64::from(small)) as u32;
        pos.min(full - 1)
    };
    let src_cols: Vec<u32> = (0..small_w).map(|i| sample(i, small_w, w)).collect();
    let src_rows: Vec<u32> = (0..small_h).map(|j| sample(j, small_h, h)).collect();

    // destination pixel x falls in small column floor((x + 0.5) · small_w / w)
    let cols: Vec<u32> = (0..w).map(|x| src_cols[sample(x, w, small_w) as usize]).collect();

    let mut out = img.blank_like();
    for y in 0..h {
        let sy = src_rows[sample(y, h, small_h) as usize];
        for (x, &sx) in cols.iter().enumerate() {
            let s = img.index(sx, sy);
            let d = out.index(x as u32, y);
            out.pixels_mut()[d..d + 4].copy_from_slice(&img.pixels()[s..s + 4]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(size: u32) -> Frame {
        let pixels = (0..size * size)
            .flat_map(|i| {
                let v = if (i % size + i / size) % 2 == 0 { 255 } else { 0 };
                [v, v, v, 255]
            })
            .collect();
        Frame::from_rgba(size, size, pixels).unwrap()
    }

    #[test]
    fn test_uniform_invariant() {
        let gray = Frame::filled(4, 4, [128, 128, 128, 255]);
        assert_eq!(pixelate(&gray, 2.0), gray);
    }

    #[test]
    fn test_cells_are_uniform() {
        let out = pixelate(&checker(8), 4.0);
        for cy in 0..2 {
            for cx in 0..2 {
                let first = out.pixel(cx * 4, cy * 4);
                for dy in 0..4 {
                    for dx in 0..4 {
                        assert_eq!(out.pixel(cx * 4 + dx, cy * 4 + dy), first);
                    }
                }
            }
        }
    }

    #[test]
    fn test_cell_one_and_fractions_identity() {
        let img = checker(5);
        assert_eq!(pixelate(&img, 1.0), img);
        assert_eq!(pixelate(&img, 0.5), img);
        assert_eq!(pixelate(&img, f32::NAN), img);
    }

    #[test]
    fn test_cell_larger_than_frame() {
        let img = checker(3);
        let out = pixelate(&img, 100.0);
        let centre = img.pixel(1, 1);
        assert!((0..3).all(|y| (0..3).all(|x| out.pixel(x, y) == centre)));
    }
}
