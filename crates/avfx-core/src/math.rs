//! Math helpers shared by the audio nodes and the parameter mappings.
//!
//! All functions are allocation-free and `no_std`.
//!
//! - [`db_to_linear`] / [`linear_to_db`] - level conversions
//! - [`semitones_to_ratio`] - pitch offset to playback-rate ratio
//! - [`lerp`], [`clamp01`] - range mapping
//! - [`ms_to_samples`] - time conversion
//! - [`flush_denormal`], [`wet_dry_mix`] - feedback and crossfade utilities

use libm::{expf, exp2f, logf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use avfx_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels. Input is floored at 1e-10 (-200 dB).
///
/// # Example
/// ```rust
/// use avfx_core::linear_to_db;
///
/// assert!(linear_to_db(1.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Frequency ratio for a pitch offset in semitones: `2^(semitones/12)`.
///
/// ```rust
/// use avfx_core::semitones_to_ratio;
///
/// assert!((semitones_to_ratio(12.0) - 2.0).abs() < 1e-6);
/// assert!((semitones_to_ratio(-12.0) - 0.5).abs() < 1e-6);
/// ```
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    exp2f(semitones / 12.0)
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp into `[0, 1]`. NaN maps to 0.
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Convert milliseconds to samples.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// Flush subnormal floats to zero.
///
/// Values below 1e-20 become zero, well before the IEEE 754 subnormal range.
/// Use in feedback loops where the signal decays indefinitely.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Crossfade between dry and wet signals: `dry + (wet - dry) * mix`.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_linear_roundtrip() {
        let original = 0.5;
        let back = db_to_linear(linear_to_db(original));
        assert!((original - back).abs() < 1e-5);
    }

    #[test]
    fn test_linear_to_db_floor() {
        assert!((linear_to_db(0.0) - (-200.0)).abs() < 0.01);
    }

    #[test]
    fn test_semitone_ratio() {
        assert!((semitones_to_ratio(7.0) - 1.498_307).abs() < 1e-4);
        assert_eq!(semitones_to_ratio(0.0), 1.0);
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(1.5), 1.0);
        assert_eq!(clamp01(f32::NAN), 0.0);
        assert_eq!(clamp01(0.3), 0.3);
    }

    #[test]
    fn test_ms_to_samples() {
        assert_eq!(ms_to_samples(10.0, 48000.0), 480.0);
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1e-25), 0.0);
        assert_eq!(flush_denormal(0.25), 0.25);
    }

    #[test]
    fn test_wet_dry_mix() {
        assert_eq!(wet_dry_mix(1.0, 0.5, 0.0), 1.0);
        assert_eq!(wet_dry_mix(1.0, 0.5, 1.0), 0.5);
        assert!((wet_dry_mix(1.0, 0.0, 0.5) - 0.5).abs() < 1e-6);
    }
}
