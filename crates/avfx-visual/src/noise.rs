//! Integer hashes and value noise.
//!
//! Everything here is a pure function of its arguments, so pixel ops that
//! use it stay deterministic for a given time value.

/// Hash of a pixel byte index into `[0, 1]`, used for posterize dither.
///
/// Xorshift on a signed 32-bit word (arithmetic right shift), keeping the
/// low 16 bits.
#[inline]
pub fn hash_noise(index: u32) -> f32 {
    let mut x = (index ^ 0x9e37_79b1) as i32;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    (x & 0xffff) as f32 / 65535.0
}

/// Lattice hash of an integer point into `[0, 1]`.
#[inline]
pub fn rnd2(x: i32, y: i32) -> f32 {
    let mut h = (x.wrapping_mul(374_761_393)).wrapping_add(y.wrapping_mul(668_265_263)) as u32;
    h ^= h << 13;
    h ^= h >> 17;
    h ^= h << 5;
    (f64::from(h) / f64::from(u32::MAX)) as f32
}

#[inline]
fn smooth(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Fractional part, zero for non-finite input.
#[inline]
fn frac(v: f32, floor: f32) -> f32 {
    let f = v - floor;
    if f.is_finite() { f } else { 0.0 }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Smoothstep-interpolated value noise in `[0, 1]`.
pub fn value2d(x: f32, y: f32) -> f32 {
    let xf = x.floor();
    let yf = y.floor();
    // saturating float-to-int casts keep huge coordinates total
    let xi = xf as i32;
    let yi = yf as i32;
    let sx = smooth(frac(x, xf));
    let sy = smooth(frac(y, yf));

    let v00 = rnd2(xi, yi);
    let v10 = rnd2(xi.wrapping_add(1), yi);
    let v01 = rnd2(xi, yi.wrapping_add(1));
    let v11 = rnd2(xi.wrapping_add(1), yi.wrapping_add(1));

    lerp(lerp(v00, v10, sx), lerp(v01, v11, sx), sy)
}

/// Fractal Brownian motion over [`value2d`], recentred to `[-1, 1]`.
///
/// Each octave doubles frequency and halves amplitude; the sum is
/// normalised by the total amplitude.
pub fn fbm2d(x: f32, y: f32, octaves: u32) -> f32 {
    let octaves = octaves.max(1);
    let mut amp = 0.5;
    let mut freq = 1.0;
    let mut sum = 0.0;
    let mut norm = 0.0;
    for _ in 0..octaves {
        sum += amp * value2d(x * freq, y * freq);
        norm += amp;
        amp *= 0.5;
        freq *= 2.0;
    }
    (sum / norm) * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_noise_range_and_determinism() {
        for i in (0..40_000).step_by(4) {
            let n = hash_noise(i);
            assert!((0.0..=1.0).contains(&n));
            assert_eq!(n, hash_noise(i));
        }
        assert_ne!(hash_noise(0), hash_noise(4));
    }

    #[test]
    fn test_value_noise_hits_lattice() {
        assert_eq!(value2d(3.0, -2.0), rnd2(3, -2));
    }

    #[test]
    fn test_value_noise_continuous() {
        let a = value2d(1.4999, 2.25);
        let b = value2d(1.5001, 2.25);
        assert!((a - b).abs() < 1e-3);
    }

    #[test]
    fn test_fbm_range() {
        for i in 0..500 {
            let v = fbm2d(i as f32 * 0.37, i as f32 * 0.11, 4);
            assert!((-1.0..=1.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn test_huge_coordinates_total() {
        assert!(fbm2d(f32::MAX, -f32::MAX, 4).is_finite());
    }
}
